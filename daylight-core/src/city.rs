//! Static city registry
//!
//! The registry is a fixed, ordered table. Order is the order the selector
//! shows, and never changes after startup.

use crate::error::DaylightError;

/// A latitude/longitude pair in decimal degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A selectable city
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub coords: Coordinates,
}

const CITIES: &[City] = &[
    City {
        name: "Null Island",
        coords: Coordinates::new(0.0, 0.0),
    },
    City {
        name: "Cardiff",
        coords: Coordinates::new(51.483333, -3.183333),
    },
    City {
        name: "London",
        coords: Coordinates::new(51.507222, -0.1275),
    },
    City {
        name: "Edinburgh",
        coords: Coordinates::new(55.953333, -3.189167),
    },
    City {
        name: "Belfast",
        coords: Coordinates::new(54.596389, -5.93),
    },
];

/// Name selected on startup and restored by reset
pub const DEFAULT_CITY: &str = "London";

/// Read-only lookup table from city name to coordinates
#[derive(Clone, Copy, Debug)]
pub struct CityRegistry {
    cities: &'static [City],
    default: &'static str,
}

impl Default for CityRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CityRegistry {
    /// The built-in UK table
    pub const fn builtin() -> Self {
        Self {
            cities: CITIES,
            default: DEFAULT_CITY,
        }
    }

    pub fn lookup(&self, name: &str) -> Result<Coordinates, DaylightError> {
        self.cities
            .iter()
            .find(|city| city.name == name)
            .map(|city| city.coords)
            .ok_or_else(|| DaylightError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// City names in selector order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cities.iter().map(|city| city.name)
    }

    pub fn cities(&self) -> &'static [City] {
        self.cities
    }

    pub fn default_city(&self) -> &'static str {
        self.default
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.cities.iter().position(|city| city.name == name)
    }

    /// Name after `name`, wrapping around. Unknown names map to the default.
    pub fn next(&self, name: &str) -> &'static str {
        match self.position(name) {
            Some(idx) => self.cities[(idx + 1) % self.cities.len()].name,
            None => self.default,
        }
    }

    /// Name before `name`, wrapping around. Unknown names map to the default.
    pub fn prev(&self, name: &str) -> &'static str {
        match self.position(name) {
            Some(idx) => {
                let len = self.cities.len();
                self.cities[(idx + len - 1) % len].name
            }
            None => self.default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_null_island() {
        let registry = CityRegistry::builtin();
        assert_eq!(
            registry.lookup("Null Island"),
            Ok(Coordinates::new(0.0, 0.0))
        );
    }

    #[test]
    fn test_lookup_unknown_city() {
        let registry = CityRegistry::builtin();
        assert_eq!(
            registry.lookup("Atlantis"),
            Err(DaylightError::NotFound("Atlantis".into()))
        );
    }

    #[test]
    fn test_names_are_ordered_and_include_default() {
        let registry = CityRegistry::builtin();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec!["Null Island", "Cardiff", "London", "Edinburgh", "Belfast"]
        );
        assert!(registry.contains(registry.default_city()));
    }

    #[test]
    fn test_next_prev_wrap() {
        let registry = CityRegistry::builtin();
        assert_eq!(registry.next("Belfast"), "Null Island");
        assert_eq!(registry.prev("Null Island"), "Belfast");
        assert_eq!(registry.next("London"), "Edinburgh");
        assert_eq!(registry.prev("London"), "Cardiff");
        assert_eq!(registry.next("Atlantis"), DEFAULT_CITY);
    }
}
