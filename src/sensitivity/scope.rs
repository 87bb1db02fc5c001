use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

pub const SCOPE_COUNT: usize = 7;

/// Aiming states, ordered from hip-fire to the highest zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, Display)]
pub enum Scope {
    #[strum(serialize = "No ADS")]
    NoAds,
    #[strum(serialize = "Iron Sight")]
    IronSight,
    #[strum(serialize = "2x Scope")]
    X2,
    #[strum(serialize = "3x Scope")]
    X3,
    #[strum(serialize = "4x Scope")]
    X4,
    #[strum(serialize = "6x Scope")]
    X6,
    #[strum(serialize = "8x Scope")]
    X8,
}

impl Scope {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn all() -> impl Iterator<Item = Scope> {
        Scope::iter()
    }
}

/// One sensitivity value per scope, kept in canonical scope order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScopeTable {
    values: [f64; SCOPE_COUNT],
}

impl ScopeTable {
    pub fn from_values(values: [f64; SCOPE_COUNT]) -> Self {
        Self { values }
    }

    pub fn filled(value: f64) -> Self {
        Self {
            values: [value; SCOPE_COUNT],
        }
    }

    pub fn get(&self, scope: Scope) -> f64 {
        self.values[scope.index()]
    }

    pub fn set(&mut self, scope: Scope, value: f64) {
        self.values[scope.index()] = value;
    }

    pub fn values(&self) -> &[f64; SCOPE_COUNT] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (Scope, f64)> + '_ {
        Scope::iter().map(move |s| (s, self.values[s.index()]))
    }

    /// Builds a new table by transforming each entry together with its scope.
    pub fn map(&self, mut f: impl FnMut(Scope, f64) -> f64) -> Self {
        let mut out = *self;
        for scope in Scope::iter() {
            out.values[scope.index()] = f(scope, self.values[scope.index()]);
        }
        out
    }
}

impl Serialize for ScopeTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SCOPE_COUNT))?;
        for (scope, value) in self.iter() {
            map.serialize_entry(&scope.to_string(), &value)?;
        }
        map.end()
    }
}

struct ScopeTableVisitor;

impl<'de> Visitor<'de> for ScopeTableVisitor {
    type Value = ScopeTable;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from scope name to sensitivity")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut values = [None; SCOPE_COUNT];
        while let Some((key, value)) = access.next_entry::<String, f64>()? {
            let scope = Scope::from_str(&key)
                .map_err(|_| de::Error::custom(format!("unknown scope '{}'", key)))?;
            values[scope.index()] = Some(value);
        }
        let mut table = ScopeTable::default();
        for scope in Scope::iter() {
            let v = values[scope.index()]
                .ok_or_else(|| de::Error::custom(format!("missing scope '{}'", scope)))?;
            table.set(scope, v);
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for ScopeTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ScopeTableVisitor)
    }
}

/// The three parallel tables of one calculation. `gyro` is absent when the device
/// reported no gyroscope, never zero-filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityTables {
    pub camera: ScopeTable,
    pub firing: ScopeTable,
    pub gyro: Option<ScopeTable>,
}

impl SensitivityTables {
    pub fn all_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.camera
            .values
            .iter()
            .chain(self.firing.values.iter())
            .chain(self.gyro.iter().flat_map(|g| g.values.iter()))
            .copied()
    }
}

