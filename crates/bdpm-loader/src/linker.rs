//! Cross-referencing engine.
//!
//! Consumes the five loaded entity sets and produces the composite graph:
//! every child record is attached to its owning specialty by CIS code, and
//! generic groups are resolved with bidirectional membership links. The
//! graph is built from scratch on every cycle and never mutated afterwards.

use std::collections::HashMap;

use bdpm_types::{CisCode, GenericGroup, GroupId, SpecialtyRecord};

use crate::graph::RegistryGraph;
use crate::loader::LoadedSources;
use crate::types::{RegistryError, RegistryResult};

/// Orphan references recorded while linking one cycle.
///
/// Orphans are excluded from the graph but always reported; they are never
/// fatal on their own.
#[derive(Debug, Default)]
pub struct LinkReport {
    /// CIS codes of composition rows with no matching specialty.
    pub composition_orphans: Vec<CisCode>,
    /// CIS codes of presentation rows with no matching specialty.
    pub presentation_orphans: Vec<CisCode>,
    /// CIS codes of condition rows with no matching specialty.
    pub condition_orphans: Vec<CisCode>,
    /// Group-source rows referencing an unknown specialty, as (group, CIS).
    pub group_orphans: Vec<(GroupId, CisCode)>,
}

impl LinkReport {
    /// Total number of orphaned references across all child kinds.
    pub fn orphan_count(&self) -> usize {
        self.composition_orphans.len()
            + self.presentation_orphans.len()
            + self.condition_orphans.len()
            + self.group_orphans.len()
    }
}

/// The linked graph plus the orphan report for the cycle.
#[derive(Debug)]
pub struct LinkOutput {
    /// The composite graph, ready to publish.
    pub graph: RegistryGraph,
    /// Orphans recorded while linking.
    pub report: LinkReport,
}

/// Links the loaded entity sets into a composite graph.
///
/// Children are attached in encountered order; that order is the display
/// order for the served record. Group membership is updated on both sides
/// (group member list and specialty back-link) within this single pass.
///
/// # Errors
///
/// A duplicate CIS code in the specialty set is a structural error: the
/// cycle aborts rather than silently overwriting a record.
pub fn link(sources: LoadedSources) -> RegistryResult<LinkOutput> {
    let mut report = LinkReport::default();

    // 1. Specialty table; CIS must be unique.
    let mut records: Vec<SpecialtyRecord> =
        Vec::with_capacity(sources.specialties.records.len());
    let mut by_cis: HashMap<CisCode, usize> =
        HashMap::with_capacity(sources.specialties.records.len());

    for specialty in sources.specialties.records {
        let cis = specialty.cis;
        if by_cis.contains_key(&cis) {
            return Err(RegistryError::DuplicateCis { cis });
        }
        by_cis.insert(cis, records.len());
        records.push(SpecialtyRecord::new(specialty));
    }

    // 2. Attach children in encountered order; unknown CIS becomes an orphan.
    for composition in sources.compositions.records {
        match by_cis.get(&composition.cis) {
            Some(&idx) => records[idx].compositions.push(composition),
            None => report.composition_orphans.push(composition.cis),
        }
    }
    for presentation in sources.presentations.records {
        match by_cis.get(&presentation.cis) {
            Some(&idx) => records[idx].presentations.push(presentation),
            None => report.presentation_orphans.push(presentation.cis),
        }
    }
    for condition in sources.conditions.records {
        match by_cis.get(&condition.cis) {
            Some(&idx) => records[idx].conditions.push(condition),
            None => report.condition_orphans.push(condition.cis),
        }
    }

    // 3./4. Resolve generic groups; first occurrence supplies the label,
    // and both sides of the membership are updated together.
    let mut groups: Vec<GenericGroup> = Vec::new();
    let mut by_group: HashMap<GroupId, usize> = HashMap::new();

    for row in sources.groups.records {
        let Some(&spec_idx) = by_cis.get(&row.cis) else {
            report.group_orphans.push((row.group_id, row.cis));
            continue;
        };
        // Decoder rejects rows with unrecognized role codes.
        let Some(role) = row.role() else { continue };

        let group_idx = match by_group.get(&row.group_id) {
            Some(&idx) => idx,
            None => {
                let idx = groups.len();
                by_group.insert(row.group_id, idx);
                groups.push(GenericGroup {
                    id: row.group_id,
                    label: row.label,
                    members: Vec::new(),
                });
                idx
            }
        };

        groups[group_idx].members.push(bdpm_types::GroupMember {
            cis: row.cis,
            role,
            sort_index: row.sort_index,
        });
        if !records[spec_idx].group_ids.contains(&row.group_id) {
            records[spec_idx].group_ids.push(row.group_id);
        }
    }

    if report.orphan_count() > 0 {
        tracing::warn!(
            compositions = report.composition_orphans.len(),
            presentations = report.presentation_orphans.len(),
            conditions = report.condition_orphans.len(),
            groups = report.group_orphans.len(),
            "orphaned references excluded from graph"
        );
    }

    let graph = RegistryGraph::from_parts(records, by_cis, groups, by_group);
    Ok(LinkOutput { graph, report })
}
