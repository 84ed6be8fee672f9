//! The composite registry graph.
//!
//! One fully linked version of the registry: every specialty with its
//! attached children, every resolved generic group, and the lookup indices
//! over both. Immutable once built; the store swaps whole graphs.

use std::collections::HashMap;

use bdpm_types::{CisCode, GenericGroup, GroupId, SpecialtyRecord};

/// A fully linked, immutable registry graph.
///
/// Enumeration order is source insertion order, which is stable across
/// refreshes of byte-identical sources.
pub struct RegistryGraph {
    specialties: Vec<SpecialtyRecord>,
    by_cis: HashMap<CisCode, usize>,
    groups: Vec<GenericGroup>,
    by_group: HashMap<GroupId, usize>,
}

impl std::fmt::Debug for RegistryGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryGraph")
            .field("specialties", &self.specialties.len())
            .field("groups", &self.groups.len())
            .finish()
    }
}

impl RegistryGraph {
    /// Assembles a graph from the linker's outputs.
    pub(crate) fn from_parts(
        specialties: Vec<SpecialtyRecord>,
        by_cis: HashMap<CisCode, usize>,
        groups: Vec<GenericGroup>,
        by_group: HashMap<GroupId, usize>,
    ) -> Self {
        Self {
            specialties,
            by_cis,
            groups,
            by_group,
        }
    }

    /// Gets the composite record for a specialty by CIS code.
    pub fn specialty(&self, cis: CisCode) -> Option<&SpecialtyRecord> {
        self.by_cis.get(&cis).map(|&idx| &self.specialties[idx])
    }

    /// Returns true if a specialty exists in the graph.
    pub fn has_specialty(&self, cis: CisCode) -> bool {
        self.by_cis.contains_key(&cis)
    }

    /// Gets a generic group by its identifier.
    pub fn group(&self, id: GroupId) -> Option<&GenericGroup> {
        self.by_group.get(&id).map(|&idx| &self.groups[idx])
    }

    /// Gets a group together with the composite records of its members.
    ///
    /// Member records follow the group's member order. Every member CIS is
    /// guaranteed present by the linker, so the result is complete.
    pub fn group_members(&self, id: GroupId) -> Option<Vec<&SpecialtyRecord>> {
        let group = self.group(id)?;
        Some(
            group
                .members
                .iter()
                .filter_map(|m| self.specialty(m.cis))
                .collect(),
        )
    }

    /// Iterates all specialties in insertion order.
    pub fn specialties(&self) -> impl Iterator<Item = &SpecialtyRecord> {
        self.specialties.iter()
    }

    /// Iterates all generic groups in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = &GenericGroup> {
        self.groups.iter()
    }

    /// Number of specialties in the graph.
    pub fn specialty_count(&self) -> usize {
        self.specialties.len()
    }

    /// Number of generic groups in the graph.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of attached child records across all specialties.
    pub fn child_record_count(&self) -> usize {
        self.specialties
            .iter()
            .map(|r| r.compositions.len() + r.presentations.len() + r.conditions.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bdpm_types::{GroupMember, MemberRole, Specialty};

    fn make_specialty(cis: CisCode, name: &str) -> Specialty {
        Specialty {
            cis,
            name: name.to_string(),
            pharmaceutical_form: "comprimé".to_string(),
            administration_routes: "orale".to_string(),
            authorization_status: "Autorisation active".to_string(),
            procedure_type: "Procédure nationale".to_string(),
            marketing_status: "Commercialisée".to_string(),
            authorization_date: None,
            bdm_status: None,
            european_authorization: None,
            holders: "HOLDER".to_string(),
            enhanced_surveillance: false,
        }
    }

    fn make_graph() -> RegistryGraph {
        let mut a = SpecialtyRecord::new(make_specialty(1, "Med A"));
        a.group_ids.push(100);
        let b = SpecialtyRecord::new(make_specialty(2, "Med B"));

        let records = vec![a, b];
        let by_cis = HashMap::from([(1, 0), (2, 1)]);
        let groups = vec![GenericGroup {
            id: 100,
            label: "G1".to_string(),
            members: vec![GroupMember {
                cis: 1,
                role: MemberRole::Reference,
                sort_index: 1,
            }],
        }];
        let by_group = HashMap::from([(100, 0)]);

        RegistryGraph::from_parts(records, by_cis, groups, by_group)
    }

    #[test]
    fn test_lookups() {
        let graph = make_graph();

        assert!(graph.has_specialty(1));
        assert!(!graph.has_specialty(3));
        assert_eq!(graph.specialty(2).unwrap().specialty.name, "Med B");
        assert!(graph.specialty(3).is_none());
        assert_eq!(graph.group(100).unwrap().label, "G1");
        assert!(graph.group(200).is_none());
    }

    #[test]
    fn test_insertion_order_enumeration() {
        let graph = make_graph();
        let names: Vec<_> = graph
            .specialties()
            .map(|r| r.specialty.name.as_str())
            .collect();
        assert_eq!(names, vec!["Med A", "Med B"]);
    }

    #[test]
    fn test_group_members_resolution() {
        let graph = make_graph();
        let members = graph.group_members(100).unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].cis(), 1);
        assert!(graph.group_members(200).is_none());
    }
}
