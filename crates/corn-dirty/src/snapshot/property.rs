use serde::{Deserialize, Serialize};

use super::Snapshot;

/// A single named property captured from a value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property name
    pub name: String,

    /// Property value at capture time
    pub value: serde_json::Value,
}

impl Property {
    /// Create a new property
    pub fn new(name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Ordered sequence of named properties describing a value's state
///
/// Equality is structural: same names, same values, same order. A property
/// that is added, dropped, reordered, or changes value makes the snapshot
/// unequal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertySnapshot {
    properties: Vec<Property>,
}

impl PropertySnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
        }
    }

    /// Start a fluent builder
    ///
    /// # Example
    /// ```
    /// use corn_dirty::PropertySnapshot;
    ///
    /// let snapshot = PropertySnapshot::builder()
    ///     .property("name", "Excalibur")
    ///     .property("durability", 250)
    ///     .build();
    ///
    /// assert_eq!(snapshot.len(), 2);
    /// assert_eq!(snapshot.get("durability"), Some(&serde_json::json!(250)));
    /// ```
    pub fn builder() -> PropertySnapshotBuilder {
        PropertySnapshotBuilder::default()
    }

    /// Get the value of the first property with the given name
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    /// Iterate properties in capture order
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter()
    }

    /// Number of captured properties
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Check if no properties were captured
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for PropertySnapshot
where
    N: Into<String>,
    V: Into<serde_json::Value>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            properties: iter
                .into_iter()
                .map(|(name, value)| Property::new(name, value))
                .collect(),
        }
    }
}

impl From<Vec<Property>> for PropertySnapshot {
    fn from(properties: Vec<Property>) -> Self {
        Self { properties }
    }
}

/// Fluent builder for [`PropertySnapshot`]
#[derive(Debug, Clone, Default)]
pub struct PropertySnapshotBuilder {
    properties: Vec<Property>,
}

impl PropertySnapshotBuilder {
    /// Append a named property
    pub fn property(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.properties.push(Property::new(name, value));
        self
    }

    /// Append a property only when a value is present
    pub fn optional_property<T: Into<serde_json::Value>>(
        self,
        name: impl Into<String>,
        value: Option<T>,
    ) -> Self {
        match value {
            Some(value) => self.property(name, value),
            None => self,
        }
    }

    /// Finish building
    pub fn build(self) -> PropertySnapshot {
        PropertySnapshot {
            properties: self.properties,
        }
    }
}

/// A value that describes its state as a list of named properties
///
/// Every `PropertyHolder` is a [`Snapshot`] with `State = PropertySnapshot`,
/// so it can be tracked by a dirty map without further glue.
pub trait PropertyHolder {
    /// Capture the current named properties, in a stable order
    fn properties(&self) -> PropertySnapshot;
}

impl<T: PropertyHolder + ?Sized> Snapshot for T {
    type State = PropertySnapshot;

    fn snapshot(&self) -> PropertySnapshot {
        self.properties()
    }
}
