//! The closed set of supported directory actions.
//!
//! Parameters are validated once here, at the request boundary, so an
//! unknown action or a malformed parameter fails before any source is
//! contacted.

use std::collections::BTreeMap;

use crate::error::DirectoryError;

/// Query parameter naming the action.
pub const ACTION_PARAM: &str = "action";
/// Query parameter carrying the proxy ticket.
pub const TICKET_PARAM: &str = "ticket";
/// Query parameter carrying the trusted-internal pre-shared token.
pub const ADMIN_ACCESS_PARAM: &str = "ADMIN_ACCESS";

/// Parameters that are part of the request surface itself and never act as
/// attribute filters.
const RESERVED_PARAMS: &[&str] = &[ACTION_PARAM, TICKET_PARAM, ADMIN_ACCESS_PARAM];

/// A validated directory action with its coerced parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SearchUsers {
        query: String,
    },
    SearchGroups {
        query: String,
        include_members: bool,
    },
    SearchUsersByAttributes {
        /// Canonical attribute name -> required value, in parameter order.
        filters: Vec<(String, String)>,
    },
    GetUser {
        id: String,
    },
    GetGroup {
        id: String,
        include_members: bool,
    },
    GetGroupMembers {
        id: String,
    },
}

impl Action {
    /// Parse and validate an action from the request's query parameters.
    pub fn from_params(params: &BTreeMap<String, String>) -> Result<Self, DirectoryError> {
        let name = params
            .get(ACTION_PARAM)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| DirectoryError::UnknownAction("no action specified".to_string()))?;

        match name {
            "search_users" => Ok(Self::SearchUsers {
                query: required(params, "query")?,
            }),
            "search_groups" => Ok(Self::SearchGroups {
                query: required(params, "query")?,
                include_members: include_members(params)?,
            }),
            "search_users_by_attributes" => {
                let filters: Vec<(String, String)> = params
                    .iter()
                    .filter(|(key, _)| !RESERVED_PARAMS.contains(&key.as_str()))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                if filters.is_empty() {
                    return Err(DirectoryError::MissingArgument(
                        "at least one attribute filter is required".to_string(),
                    ));
                }
                Ok(Self::SearchUsersByAttributes { filters })
            }
            "get_user" => Ok(Self::GetUser {
                id: required(params, "id")?,
            }),
            "get_group" => Ok(Self::GetGroup {
                id: required(params, "id")?,
                include_members: include_members(params)?,
            }),
            "get_group_members" => Ok(Self::GetGroupMembers {
                id: required(params, "id")?,
            }),
            other => Err(DirectoryError::UnknownAction(format!(
                "action '{other}' is not one of [search_users, search_groups, \
                 search_users_by_attributes, get_user, get_group, get_group_members]"
            ))),
        }
    }

    /// Wire name of the action.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SearchUsers { .. } => "search_users",
            Self::SearchGroups { .. } => "search_groups",
            Self::SearchUsersByAttributes { .. } => "search_users_by_attributes",
            Self::GetUser { .. } => "get_user",
            Self::GetGroup { .. } => "get_group",
            Self::GetGroupMembers { .. } => "get_group_members",
        }
    }

    /// Whether this is a get-style single-id lookup (as opposed to a search).
    pub fn is_get_style(&self) -> bool {
        matches!(
            self,
            Self::GetUser { .. } | Self::GetGroup { .. } | Self::GetGroupMembers { .. }
        )
    }
}

fn required(params: &BTreeMap<String, String>, name: &str) -> Result<String, DirectoryError> {
    params
        .get(name)
        .filter(|value| !value.is_empty())
        .cloned()
        .ok_or_else(|| DirectoryError::MissingArgument(format!("'{name}' must be specified")))
}

fn include_members(params: &BTreeMap<String, String>) -> Result<bool, DirectoryError> {
    match params.get("include_members").map(String::as_str) {
        None => Ok(false),
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(DirectoryError::InvalidArgument(format!(
            "include_members must be 'true' or 'false', got '{other}'"
        ))),
    }
}
