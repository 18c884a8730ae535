//! Chip data models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::errors::ChipSetError;
use crate::money::{Money, round_money};

/// Denomination ID type
pub type DenominationId = u32;

/// One chip type: a fixed face value with a display color and name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denomination {
    pub id: DenominationId,
    pub face_value: Money,
    /// Opaque display token (e.g. `#22c55e`)
    pub color: String,
    pub name: String,
}

impl Denomination {
    /// Create a new denomination
    pub fn new(
        id: DenominationId,
        face_value: Money,
        color: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            face_value,
            color: color.into(),
            name: name.into(),
        }
    }
}

/// Ordered set of denominations, unique by id.
///
/// Insertion order is kept for display; the distributor only ever walks the
/// set through [`ChipSet::ascending`] and [`ChipSet::descending`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Denomination>", into = "Vec<Denomination>")]
pub struct ChipSet {
    denominations: Vec<Denomination>,
}

impl ChipSet {
    /// Build a chip set, rejecting duplicate ids and non-positive face values
    pub fn new(denominations: Vec<Denomination>) -> Result<Self, ChipSetError> {
        let mut set = Self {
            denominations: Vec::with_capacity(denominations.len()),
        };
        for denomination in denominations {
            set.insert(denomination)?;
        }
        Ok(set)
    }

    /// A chip set with no denominations
    pub fn empty() -> Self {
        Self {
            denominations: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.denominations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.denominations.is_empty()
    }

    /// Denominations in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Denomination> {
        self.denominations.iter()
    }

    pub fn get(&self, id: DenominationId) -> Option<&Denomination> {
        self.denominations.iter().find(|d| d.id == id)
    }

    /// Denominations from smallest to largest face value (ties by id)
    pub fn ascending(&self) -> Vec<&Denomination> {
        let mut sorted: Vec<&Denomination> = self.denominations.iter().collect();
        sorted.sort_by(|a, b| a.face_value.cmp(&b.face_value).then(a.id.cmp(&b.id)));
        sorted
    }

    /// Denominations from largest to smallest face value (ties by id)
    pub fn descending(&self) -> Vec<&Denomination> {
        let mut sorted: Vec<&Denomination> = self.denominations.iter().collect();
        sorted.sort_by(|a, b| b.face_value.cmp(&a.face_value).then(a.id.cmp(&b.id)));
        sorted
    }

    /// Add a denomination
    ///
    /// # Errors
    ///
    /// * `ChipSetError::DuplicateId` - The id is already taken
    /// * `ChipSetError::InvalidFaceValue` - Face value is zero or negative
    pub fn insert(&mut self, denomination: Denomination) -> Result<(), ChipSetError> {
        validate_face_value(&denomination)?;
        if self.get(denomination.id).is_some() {
            return Err(ChipSetError::DuplicateId(denomination.id));
        }
        self.denominations.push(denomination);
        Ok(())
    }

    /// Replace the denomination with the same id
    pub fn update(&mut self, denomination: Denomination) -> Result<(), ChipSetError> {
        validate_face_value(&denomination)?;
        let slot = self
            .denominations
            .iter_mut()
            .find(|d| d.id == denomination.id)
            .ok_or(ChipSetError::DenominationNotFound(denomination.id))?;
        *slot = denomination;
        Ok(())
    }

    /// Remove a denomination by id, returning it
    pub fn remove(&mut self, id: DenominationId) -> Result<Denomination, ChipSetError> {
        let index = self
            .denominations
            .iter()
            .position(|d| d.id == id)
            .ok_or(ChipSetError::DenominationNotFound(id))?;
        Ok(self.denominations.remove(index))
    }

    /// Next free denomination id
    pub fn next_id(&self) -> DenominationId {
        self.denominations.iter().map(|d| d.id).max().map_or(1, |id| id + 1)
    }

    /// Monetary value of a counted stack of chips
    ///
    /// # Errors
    ///
    /// * `ChipSetError::DenominationNotFound` - The stack holds a chip this set doesn't know
    pub fn value_of(&self, chips: &Distribution) -> Result<Money, ChipSetError> {
        chips.iter().try_fold(Decimal::ZERO, |total, (id, count)| {
            let denomination = self.get(id).ok_or(ChipSetError::DenominationNotFound(id))?;
            Ok(round_money(total + denomination.face_value * Decimal::from(count)))
        })
    }
}

impl Default for ChipSet {
    fn default() -> Self {
        Self {
            denominations: vec![
                Denomination::new(1, Decimal::new(25, 2), "#22c55e", "Verde"),
                Denomination::new(2, Decimal::new(50, 2), "#ef4444", "Vermelha"),
                Denomination::new(3, Decimal::ONE, "#f5f5f5", "Branca"),
                Denomination::new(4, Decimal::TEN, "#171717", "Preta"),
            ],
        }
    }
}

impl TryFrom<Vec<Denomination>> for ChipSet {
    type Error = ChipSetError;

    fn try_from(denominations: Vec<Denomination>) -> Result<Self, Self::Error> {
        Self::new(denominations)
    }
}

impl From<ChipSet> for Vec<Denomination> {
    fn from(set: ChipSet) -> Self {
        set.denominations
    }
}

fn validate_face_value(denomination: &Denomination) -> Result<(), ChipSetError> {
    if denomination.face_value <= Decimal::ZERO {
        return Err(ChipSetError::InvalidFaceValue {
            id: denomination.id,
            face_value: denomination.face_value,
        });
    }
    Ok(())
}

/// Chip count per denomination, ordered by denomination id.
///
/// A distribution with no entries is a valid (empty) result; failures are
/// reported as [`super::DistributionError`] instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distribution {
    counts: BTreeMap<DenominationId, u64>,
}

impl Distribution {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Count for a denomination (zero when absent)
    pub fn count(&self, id: DenominationId) -> u64 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    /// Add `count` chips of a denomination
    pub fn add(&mut self, id: DenominationId, count: u64) {
        *self.counts.entry(id).or_insert(0) += count;
    }

    /// Number of physical chips
    pub fn total_chips(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(denomination id, count)` pairs by id
    pub fn iter(&self) -> impl Iterator<Item = (DenominationId, u64)> + '_ {
        self.counts.iter().map(|(id, count)| (*id, *count))
    }

    /// Sum of two distributions
    #[must_use]
    pub fn merge(&self, other: &Distribution) -> Distribution {
        let mut merged = self.clone();
        for (id, count) in other.iter() {
            merged.add(id, count);
        }
        merged
    }

    /// Ensure every denomination of `chips` has an entry
    #[must_use]
    pub fn normalized(mut self, chips: &ChipSet) -> Distribution {
        for denomination in chips.iter() {
            self.counts.entry(denomination.id).or_insert(0);
        }
        self
    }
}

impl FromIterator<(DenominationId, u64)> for Distribution {
    fn from_iter<I: IntoIterator<Item = (DenominationId, u64)>>(iter: I) -> Self {
        let mut distribution = Distribution::empty();
        for (id, count) in iter {
            distribution.add(id, count);
        }
        distribution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_chip_set() {
        let chips = ChipSet::default();
        assert_eq!(chips.len(), 4);
        let faces: Vec<Money> = chips.ascending().iter().map(|d| d.face_value).collect();
        assert_eq!(faces, vec![dec!(0.25), dec!(0.50), dec!(1), dec!(10)]);
    }

    #[test]
    fn test_descending_breaks_ties_by_id() {
        let chips = ChipSet::new(vec![
            Denomination::new(7, dec!(5), "blue", "Azul"),
            Denomination::new(2, dec!(5), "pink", "Rosa"),
            Denomination::new(3, dec!(25), "green", "Verde"),
        ])
        .unwrap();
        let ids: Vec<DenominationId> = chips.descending().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![3, 2, 7]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = ChipSet::new(vec![
            Denomination::new(1, dec!(1), "white", "Branca"),
            Denomination::new(1, dec!(5), "red", "Vermelha"),
        ])
        .unwrap_err();
        assert_eq!(err, ChipSetError::DuplicateId(1));
    }

    #[test]
    fn test_non_positive_face_value_rejected() {
        let err = ChipSet::new(vec![Denomination::new(1, dec!(0), "white", "Branca")]).unwrap_err();
        assert!(matches!(err, ChipSetError::InvalidFaceValue { id: 1, .. }));

        let mut chips = ChipSet::default();
        let err = chips
            .update(Denomination::new(3, dec!(-1), "white", "Branca"))
            .unwrap_err();
        assert!(matches!(err, ChipSetError::InvalidFaceValue { id: 3, .. }));
    }

    #[test]
    fn test_update_and_remove() {
        let mut chips = ChipSet::default();
        chips
            .update(Denomination::new(4, dec!(5), "#171717", "Preta"))
            .unwrap();
        assert_eq!(chips.get(4).unwrap().face_value, dec!(5));

        let removed = chips.remove(1).unwrap();
        assert_eq!(removed.name, "Verde");
        assert_eq!(chips.remove(1), Err(ChipSetError::DenominationNotFound(1)));
        assert_eq!(chips.next_id(), 5);
        assert_eq!(ChipSet::empty().next_id(), 1);
    }

    #[test]
    fn test_value_of_counted_stack() {
        let chips = ChipSet::default();
        let stack: Distribution = [(1, 4), (2, 3), (3, 12), (4, 2)].into_iter().collect();
        assert_eq!(chips.value_of(&stack).unwrap(), dec!(34.50));

        let unknown: Distribution = [(9, 1)].into_iter().collect();
        assert_eq!(
            chips.value_of(&unknown),
            Err(ChipSetError::DenominationNotFound(9))
        );
    }

    #[test]
    fn test_distribution_merge_and_normalize() {
        let a: Distribution = [(1, 2), (3, 5)].into_iter().collect();
        let b: Distribution = [(3, 1), (4, 1)].into_iter().collect();
        let merged = a.merge(&b);
        assert_eq!(merged.count(1), 2);
        assert_eq!(merged.count(3), 6);
        assert_eq!(merged.count(4), 1);
        assert_eq!(merged.total_chips(), 9);

        let normalized = Distribution::empty().normalized(&ChipSet::default());
        assert_eq!(normalized.iter().count(), 4);
        assert_eq!(normalized.total_chips(), 0);
    }

    #[test]
    fn test_chip_set_serde_rejects_duplicates() {
        let json = r##"[
            {"id": 1, "face_value": "1", "color": "#fff", "name": "Branca"},
            {"id": 1, "face_value": "5", "color": "#f00", "name": "Vermelha"}
        ]"##;
        assert!(serde_json::from_str::<ChipSet>(json).is_err());

        let json = r##"[{"id": 1, "face_value": "0.25", "color": "#0f0", "name": "Verde"}]"##;
        let chips: ChipSet = serde_json::from_str(json).unwrap();
        assert_eq!(chips.get(1).unwrap().face_value, dec!(0.25));
    }
}
