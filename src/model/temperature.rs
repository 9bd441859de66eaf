use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Storage temperature a primary shelf is dedicated to.
///
/// The overflow shelf accepts every variant, so there is no `Any` class here:
/// a label that matches none of these is treated as unrecognized and the
/// kitchen routes that order straight to overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Hot,
    Cold,
    Frozen,
}

impl Temperature {
    /// Every core temperature, in shelf display order.
    pub const ALL: [Temperature; 3] = [Temperature::Hot, Temperature::Cold, Temperature::Frozen];

    /// Resolves an order's `temp` label. Matching ignores ASCII case.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|temp| temp.label().eq_ignore_ascii_case(label.trim()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Temperature::Hot => "hot",
            Temperature::Cold => "cold",
            Temperature::Frozen => "frozen",
        }
    }
}

impl Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_known_classes() {
        assert_eq!(Temperature::from_label("hot"), Some(Temperature::Hot));
        assert_eq!(Temperature::from_label("Cold"), Some(Temperature::Cold));
        assert_eq!(Temperature::from_label(" FROZEN "), Some(Temperature::Frozen));
    }

    #[test]
    fn test_from_label_unrecognized() {
        assert_eq!(Temperature::from_label("any"), None);
        assert_eq!(Temperature::from_label("lukewarm"), None);
        assert_eq!(Temperature::from_label(""), None);
    }
}
