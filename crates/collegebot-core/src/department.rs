//! Department qualifier for campus questions.
//!
//! A department narrows the scope of a question to one branch of the
//! college. It is ephemeral UI state: it qualifies the outgoing request
//! but is never persisted and is not part of a recorded entry.

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// The fixed set of departments the Q&A service knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum Department {
    Cse,
    It,
    Csbs,
    Mech,
    Civil,
}

impl Department {
    /// Returns the value placed in the `department` query parameter.
    ///
    /// The remote service expects the lowercased department label.
    pub fn query_value(&self) -> String {
        self.to_string().to_lowercase()
    }

    /// Lists every department, in declaration order, for display.
    pub fn all() -> Vec<Department> {
        Department::iter().collect()
    }
}

impl Default for Department {
    fn default() -> Self {
        Department::Cse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display_is_uppercase() {
        assert_eq!(Department::Cse.to_string(), "CSE");
        assert_eq!(Department::Csbs.to_string(), "CSBS");
    }

    #[test]
    fn test_query_value_is_lowercase() {
        assert_eq!(Department::Mech.query_value(), "mech");
        assert_eq!(Department::It.query_value(), "it");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Department::from_str("civil").unwrap(), Department::Civil);
        assert_eq!(Department::from_str("CSE").unwrap(), Department::Cse);
        assert!(Department::from_str("physics").is_err());
    }

    #[test]
    fn test_all_lists_every_department() {
        let all = Department::all();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0], Department::Cse);
    }
}
