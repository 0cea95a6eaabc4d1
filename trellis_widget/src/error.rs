// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by tree and geometry operations.

use alloc::string::String;
use core::fmt;

use crate::types::WidgetId;

/// Failure of a widget tree or geometry operation.
///
/// Every variant describes bad input. Nothing in this crate is transient, so there is
/// nothing to retry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WidgetError {
    /// No widget class is registered under this name.
    ClassNotFound {
        /// The name that was looked up.
        name: String,
    },
    /// No geometry manager is registered under this name.
    ManagerNotFound {
        /// The name that was looked up.
        name: String,
    },
    /// The parent passed to [`Toolkit::create`](crate::Toolkit::create) is not a live widget.
    InvalidParent {
        /// The rejected parent.
        parent: WidgetId,
    },
    /// The widget has been destroyed.
    StaleWidget {
        /// The stale identifier.
        id: WidgetId,
    },
    /// The operation does not apply to the root widget.
    RootWidget,
    /// Every pick id is taken by a live widget.
    TooManyWidgets {
        /// Maximum number of live widgets.
        limit: usize,
    },
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClassNotFound { name } => write!(f, "widget class {name:?} is not registered"),
            Self::ManagerNotFound { name } => {
                write!(f, "geometry manager {name:?} is not registered")
            }
            Self::InvalidParent { parent } => write!(f, "parent widget {parent} is not alive"),
            Self::StaleWidget { id } => write!(f, "widget {id} has been destroyed"),
            Self::RootWidget => f.write_str("operation is not allowed on the root widget"),
            Self::TooManyWidgets { limit } => {
                write!(f, "cannot have more than {limit} live widgets")
            }
        }
    }
}

impl core::error::Error for WidgetError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_names_the_culprit() {
        let err = WidgetError::ClassNotFound {
            name: "button".into(),
        };
        assert_eq!(err.to_string(), "widget class \"button\" is not registered");
        let err = WidgetError::StaleWidget {
            id: WidgetId::new(3, 2),
        };
        assert_eq!(err.to_string(), "widget 3v2 has been destroyed");
    }
}
