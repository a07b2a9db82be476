//! # Coordinate Table
//!
//! Maps control names ("A", "LS_Click", ...) to pixel positions in the
//! window. Tables come from the built-in profile, from the `[profile.positions]`
//! section of the config file, or from the calibration workflow.
//!
//! ```
//! use pad_overlay::layout::{CoordinateTable, ScreenPoint};
//!
//! let mut table = CoordinateTable::new();
//! table.insert("A", ScreenPoint::new(458, 333));
//! table.insert("B", ScreenPoint::new(496, 297));
//!
//! assert_eq!(table.get("A"), Some(ScreenPoint::new(458, 333)));
//! assert_eq!(table.names().collect::<Vec<_>>(), vec!["A", "B"]);
//! ```

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// A pixel position in window coordinates (origin top-left, y grows down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "[i32; 2]")]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance to `other`, computed without overflow.
    #[must_use]
    pub fn distance_squared(&self, other: ScreenPoint) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }

    /// Returns this point moved by `(dx, dy)`, saturating at the `i32` range.
    #[must_use]
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl From<[i32; 2]> for ScreenPoint {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<(i32, i32)> for ScreenPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for ScreenPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Ordered mapping from control name to screen position.
///
/// Names are unique: inserting an existing name replaces its position but
/// keeps its place in the order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinateTable {
    entries: Vec<(String, ScreenPoint)>,
}

impl CoordinateTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the position recorded for `name`.
    pub fn insert(&mut self, name: impl Into<String>, point: ScreenPoint) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = point,
            None => self.entries.push((name, point)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<ScreenPoint> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, point)| *point)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ScreenPoint)> + '_ {
        self.entries.iter().map(|(name, point)| (name.as_str(), *point))
    }

    /// Iterates names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Renders the table as a TOML table that can be pasted into a config file.
    ///
    /// ```
    /// use pad_overlay::layout::{CoordinateTable, ScreenPoint};
    ///
    /// let mut table = CoordinateTable::new();
    /// table.insert("View(Back)", ScreenPoint::new(282, 297));
    ///
    /// assert_eq!(
    ///     table.to_toml("profile.positions"),
    ///     "[profile.positions]\n\"View(Back)\" = [282, 297]\n"
    /// );
    /// ```
    #[must_use]
    pub fn to_toml(&self, table_name: &str) -> String {
        let mut out = format!("[{}]\n", table_name);
        for (name, point) in self.iter() {
            out.push_str(&format!("{} = [{}, {}]\n", quote_key(name), point.x, point.y));
        }
        out
    }
}

impl FromIterator<(String, ScreenPoint)> for CoordinateTable {
    fn from_iter<I: IntoIterator<Item = (String, ScreenPoint)>>(iter: I) -> Self {
        let mut table = CoordinateTable::new();
        for (name, point) in iter {
            table.insert(name, point);
        }
        table
    }
}

impl<'de> Deserialize<'de> for CoordinateTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TableVisitor)
    }
}

struct TableVisitor;

impl<'de> Visitor<'de> for TableVisitor {
    type Value = CoordinateTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table of control names to [x, y] positions")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut table = CoordinateTable::new();
        while let Some((name, point)) = map.next_entry::<String, ScreenPoint>()? {
            if table.contains(&name) {
                return Err(serde::de::Error::custom(format!(
                    "duplicate control name '{}'",
                    name
                )));
            }
            table.insert(name, point);
        }
        Ok(table)
    }
}

/// Quotes a control name as a TOML basic string key.
fn quote_key(name: &str) -> String {
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('"');
    for c in name.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut table = CoordinateTable::new();
        table.insert("Y", ScreenPoint::new(1, 1));
        table.insert("A", ScreenPoint::new(2, 2));
        table.insert("X", ScreenPoint::new(3, 3));

        let names: Vec<_> = table.names().collect();
        assert_eq!(names, vec!["Y", "A", "X"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut table = CoordinateTable::new();
        table.insert("A", ScreenPoint::new(1, 1));
        table.insert("B", ScreenPoint::new(2, 2));
        table.insert("A", ScreenPoint::new(9, 9));

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("A"), Some(ScreenPoint::new(9, 9)));
        assert_eq!(table.names().next(), Some("A"));
    }

    #[test]
    fn test_same_point_for_two_names() {
        let mut table = CoordinateTable::new();
        table.insert("A", ScreenPoint::new(5, 5));
        table.insert("B", ScreenPoint::new(5, 5));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_missing_name() {
        let table = CoordinateTable::new();
        assert!(table.is_empty());
        assert_eq!(table.get("A"), None);
    }

    #[test]
    fn test_distance_squared() {
        let a = ScreenPoint::new(0, 0);
        let b = ScreenPoint::new(3, 4);
        assert_eq!(a.distance_squared(b), 25);
        assert_eq!(b.distance_squared(a), 25);
    }

    #[test]
    fn test_offset() {
        assert_eq!(ScreenPoint::new(184, 294).offset(30, -15), ScreenPoint::new(214, 279));
    }

    #[test]
    fn test_offset_saturates() {
        assert_eq!(
            ScreenPoint::new(i32::MAX, i32::MIN).offset(30, -30),
            ScreenPoint::new(i32::MAX, i32::MIN)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ScreenPoint::new(458, 333).to_string(), "(458, 333)");
        assert_eq!(ScreenPoint::new(-1, 0).to_string(), "(-1, 0)");
    }

    #[test]
    fn test_deserialize_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            positions: CoordinateTable,
        }

        let parsed: Wrapper = toml::from_str(
            r#"
[positions]
"A" = [458, 333]
"View(Back)" = [282, 297]
"#,
        )
        .unwrap();

        assert_eq!(parsed.positions.len(), 2);
        assert_eq!(parsed.positions.get("A"), Some(ScreenPoint::new(458, 333)));
        assert_eq!(
            parsed.positions.get("View(Back)"),
            Some(ScreenPoint::new(282, 297))
        );
    }

    #[test]
    fn test_deserialize_rejects_bad_point() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Wrapper {
            positions: CoordinateTable,
        }

        let parsed: std::result::Result<Wrapper, _> = toml::from_str("[positions]\nA = [1]\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_to_toml_is_loadable() {
        #[derive(Deserialize)]
        struct Wrapper {
            positions: CoordinateTable,
        }

        let mut table = CoordinateTable::new();
        table.insert("A", ScreenPoint::new(458, 333));
        table.insert("Menu(Start)", ScreenPoint::new(360, 297));
        table.insert("odd\"name", ScreenPoint::new(1, 2));

        let text = table.to_toml("positions");
        let parsed: Wrapper = toml::from_str(&text).unwrap();
        assert_eq!(parsed.positions.get("A"), table.get("A"));
        assert_eq!(parsed.positions.get("Menu(Start)"), table.get("Menu(Start)"));
        assert_eq!(parsed.positions.get("odd\"name"), Some(ScreenPoint::new(1, 2)));
    }

    #[test]
    fn test_to_toml_keeps_order() {
        let mut table = CoordinateTable::new();
        table.insert("B", ScreenPoint::new(2, 2));
        table.insert("A", ScreenPoint::new(1, 1));

        let text = table.to_toml("profile.positions");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, vec!["[profile.positions]", "\"B\" = [2, 2]", "\"A\" = [1, 1]"]);
    }
}
