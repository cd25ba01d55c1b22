//! The named generation actions

use crate::options::AccessorKinds;

/// One of the three user-invocable actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    GenerateGettersAndSetters,
    GenerateGetters,
    GenerateSetters,
}

impl Action {
    pub const ALL: [Action; 3] = [
        Action::GenerateGettersAndSetters,
        Action::GenerateGetters,
        Action::GenerateSetters,
    ];

    /// Stable identifier (CLI subcommand, LSP command id)
    pub fn name(&self) -> &'static str {
        match self {
            Action::GenerateGettersAndSetters => "getters-setters",
            Action::GenerateGetters => "getters",
            Action::GenerateSetters => "setters",
        }
    }

    /// A short description of what this action does
    pub fn description(&self) -> &'static str {
        match self {
            Action::GenerateGettersAndSetters => "Generate missing getters and setters",
            Action::GenerateGetters => "Generate missing getters",
            Action::GenerateSetters => "Generate missing setters",
        }
    }

    pub fn kinds(&self) -> AccessorKinds {
        match self {
            Action::GenerateGettersAndSetters => AccessorKinds::both(),
            Action::GenerateGetters => AccessorKinds::getters_only(),
            Action::GenerateSetters => AccessorKinds::setters_only(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        let names: Vec<&str> = Action::ALL.iter().map(|action| action.name()).collect();
        assert_eq!(names, vec!["getters-setters", "getters", "setters"]);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Action::GenerateGettersAndSetters.kinds(), AccessorKinds::both());
        assert!(!Action::GenerateGetters.kinds().setters);
        assert!(!Action::GenerateSetters.kinds().getters);
    }
}
