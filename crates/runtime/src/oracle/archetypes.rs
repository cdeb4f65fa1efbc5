//! Archetype catalog implementing [`siege_core::ArchetypeOracle`].
use std::collections::BTreeMap;

use siege_core::{ArchetypeOracle, MonsterArchetype, TemplateId};

/// ArchetypeOracle implementation backed by a loaded catalog
#[derive(Clone, Debug, Default)]
pub struct ArchetypeOracleImpl {
    archetypes: BTreeMap<TemplateId, MonsterArchetype>,
}

impl ArchetypeOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an archetype, replacing any previous entry with the same template id
    pub fn add_archetype(&mut self, archetype: MonsterArchetype) {
        self.archetypes.insert(archetype.template_id, archetype);
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }
}

impl FromIterator<MonsterArchetype> for ArchetypeOracleImpl {
    fn from_iter<I: IntoIterator<Item = MonsterArchetype>>(iter: I) -> Self {
        let mut oracle = Self::new();
        for archetype in iter {
            oracle.add_archetype(archetype);
        }
        oracle
    }
}

impl ArchetypeOracle for ArchetypeOracleImpl {
    fn archetype(&self, template: TemplateId) -> Option<&MonsterArchetype> {
        self.archetypes.get(&template)
    }

    fn templates(&self) -> Vec<TemplateId> {
        self.archetypes.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_entries_replace_earlier_ones() {
        let oracle: ArchetypeOracleImpl = [
            MonsterArchetype::new(TemplateId(4), "shaman", 10),
            MonsterArchetype::new(TemplateId(1), "slime", 5),
            MonsterArchetype::new(TemplateId(4), "elder shaman", 30),
        ]
        .into_iter()
        .collect();

        assert_eq!(oracle.templates(), vec![TemplateId(1), TemplateId(4)]);
        assert_eq!(oracle.archetype(TemplateId(4)).unwrap().hp, 30);
        assert!(oracle.archetype(TemplateId(9)).is_none());
    }
}
