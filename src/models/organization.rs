use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organization {
    /// Primary key rendered as text, so integer and UUID keys are handled alike.
    pub id: String,
    pub name: String,
}

impl Organization {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Find an organization by its exact display name.
    pub fn find_by_name<'a>(organizations: &'a [Organization], name: &str) -> Option<&'a Organization> {
        organizations.iter().find(|org| org.name == name)
    }

    pub fn find_by_id<'a>(organizations: &'a [Organization], id: &str) -> Option<&'a Organization> {
        organizations.iter().find(|org| org.id == id)
    }
}

impl std::fmt::Display for Organization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_name_is_exact() {
        let orgs = vec![
            Organization::new("1", "Acme Solar"),
            Organization::new("2", "Acme Solar MX"),
        ];

        assert_eq!(Organization::find_by_name(&orgs, "Acme Solar").map(|o| o.id.as_str()), Some("1"));
        assert!(Organization::find_by_name(&orgs, "acme solar").is_none());
        assert_eq!(Organization::find_by_id(&orgs, "2").map(|o| o.name.as_str()), Some("Acme Solar MX"));
        assert!(Organization::find_by_id(&orgs, "3").is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Organization::new("7", "Sunrise").to_string(), "Sunrise (7)");
    }
}
