//! User records as returned by randomuser.me
//!
//! The loader never interprets these beyond display; every field defaults so a
//! sparse record still passes through.

use serde::{Deserialize, Serialize};

/// A single user record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub gender: String,
    pub name: Name,
    pub email: String,
    pub picture: Picture,
    pub location: Location,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Name {
    pub title: String,
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Picture {
    pub thumbnail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub city: String,
    pub country: String,
}

impl User {
    /// "first last", as shown on a card heading
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name.first, self.name.last)
    }

    /// "city country", as shown under the name
    pub fn location_line(&self) -> String {
        format!("{} {}", self.location.city, self.location.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_record() {
        let value = json!({
            "gender": "female",
            "name": { "title": "Ms", "first": "Ida", "last": "Nielsen" },
            "email": "ida.nielsen@example.com",
            "picture": {
                "large": "https://randomuser.me/api/portraits/women/1.jpg",
                "thumbnail": "https://randomuser.me/api/portraits/thumb/women/1.jpg"
            },
            "location": { "city": "Aarhus", "country": "Denmark", "postcode": 8000 },
            "nat": "DK"
        });

        let user: User = serde_json::from_value(value).unwrap();
        assert_eq!(user.gender, "female");
        assert_eq!(user.display_name(), "Ida Nielsen");
        assert_eq!(user.location_line(), "Aarhus Denmark");
        assert!(user.picture.thumbnail.contains("thumb"));
    }

    #[test]
    fn test_deserialize_sparse_record() {
        let user: User = serde_json::from_value(json!({ "email": "x@example.com" })).unwrap();
        assert_eq!(user.email, "x@example.com");
        assert_eq!(user.name, Name::default());
        assert_eq!(user.display_name(), " ");
    }
}
