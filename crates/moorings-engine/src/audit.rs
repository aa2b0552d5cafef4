//! Consistency audit: recompute berth status from ledger ground truth.
//!
//! Berth status is a cached projection of the placement ledger; the two
//! can drift only through corrupted input (a hand-edited state file).
//! `check` reports drift without mutating; `repair` rewrites berth
//! status/boat fields from the ledger. Neither invents nor deletes
//! placements.

use crate::engine::{Marina, RepairAction};
use moorings_model::normalize_rotation;
use serde::Serialize;
use std::collections::BTreeSet;

pub mod failure_class {
    pub const BERTH_STATUS_DRIFT: &str = "berth_status_drift";
    pub const BERTH_BOAT_DRIFT: &str = "berth_boat_drift";
    pub const PLACEMENT_ORPHANED: &str = "placement_orphaned";
    pub const PLACEMENT_OVERSIZED: &str = "placement_oversized";
    pub const PLACEMENT_ROTATION_RANGE: &str = "placement_rotation_range";
}

/// One detected inconsistency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsistencyFinding {
    pub failure_class: String,
    /// Berth or placement id the finding is about.
    pub subject: String,
    pub message: String,
}

/// Sorted findings plus the derived verdict.
#[derive(Debug, Clone, Serialize)]
pub struct ConsistencyReport {
    pub result: String,
    pub failure_classes: Vec<String>,
    pub findings: Vec<ConsistencyFinding>,
}

impl ConsistencyReport {
    fn from_findings(mut findings: Vec<ConsistencyFinding>) -> Self {
        findings.sort_by(|a, b| {
            (&a.subject, &a.failure_class, &a.message).cmp(&(&b.subject, &b.failure_class, &b.message))
        });
        let failure_classes: Vec<String> = findings
            .iter()
            .map(|finding| finding.failure_class.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Self {
            result: if findings.is_empty() {
                "consistent".to_string()
            } else {
                "inconsistent".to_string()
            },
            failure_classes,
            findings,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.findings.is_empty()
    }
}

fn push_finding(
    findings: &mut Vec<ConsistencyFinding>,
    failure_class: &str,
    subject: &str,
    message: String,
) {
    findings.push(ConsistencyFinding {
        failure_class: failure_class.to_string(),
        subject: subject.to_string(),
        message,
    });
}

/// Verify invariants 1–6 against the current stores.
pub fn check(marina: &Marina) -> ConsistencyReport {
    let mut findings = Vec::new();

    for placement in marina.ledger().list_all() {
        match marina.registry().get(&placement.berth_id) {
            None => push_finding(
                &mut findings,
                failure_class::PLACEMENT_ORPHANED,
                &placement.id,
                format!("references unknown berth {}", placement.berth_id),
            ),
            Some(berth) => {
                if !berth.admits(placement.size) {
                    push_finding(
                        &mut findings,
                        failure_class::PLACEMENT_OVERSIZED,
                        &placement.id,
                        format!(
                            "size {} exceeds berth {} footprint",
                            placement.size, berth.code
                        ),
                    );
                }
            }
        }

        let in_range = normalize_rotation(placement.rotation)
            .map(|normalized| normalized == placement.rotation)
            .unwrap_or(false);
        if !in_range {
            push_finding(
                &mut findings,
                failure_class::PLACEMENT_ROTATION_RANGE,
                &placement.id,
                format!("rotation {} is not normalized to [0, 360)", placement.rotation),
            );
        }
    }

    for berth in marina.registry().berths() {
        let active = marina.ledger().get_by_berth(&berth.id);
        match active {
            Some(placement) => {
                if !berth.status.is_bound() {
                    push_finding(
                        &mut findings,
                        failure_class::BERTH_STATUS_DRIFT,
                        &berth.id,
                        format!(
                            "status {} but placement {} is bound",
                            berth.status, placement.id
                        ),
                    );
                }
                if berth.assigned_boat_id.as_deref() != Some(placement.id.as_str()) {
                    push_finding(
                        &mut findings,
                        failure_class::BERTH_BOAT_DRIFT,
                        &berth.id,
                        format!(
                            "assigned_boat_id {:?} does not match placement {}",
                            berth.assigned_boat_id, placement.id
                        ),
                    );
                }
            }
            None => {
                if berth.status.is_bound() {
                    push_finding(
                        &mut findings,
                        failure_class::BERTH_STATUS_DRIFT,
                        &berth.id,
                        format!("status {} but no placement is bound", berth.status),
                    );
                }
                if berth.assigned_boat_id.is_some() {
                    push_finding(
                        &mut findings,
                        failure_class::BERTH_BOAT_DRIFT,
                        &berth.id,
                        format!(
                            "assigned_boat_id {:?} but no placement is bound",
                            berth.assigned_boat_id
                        ),
                    );
                }
            }
        }
    }

    ConsistencyReport::from_findings(findings)
}

/// Rewrite berth status/boat fields from ledger ground truth.
///
/// Returns the applied corrections in berth id order. Placement-side
/// findings (orphans, oversize, rotation range) are reported by `check`
/// but deliberately not auto-repaired.
pub fn repair(marina: &mut Marina) -> Vec<RepairAction> {
    let berth_ids: Vec<String> = marina
        .registry()
        .berths()
        .map(|berth| berth.id.clone())
        .collect();

    berth_ids
        .iter()
        .filter_map(|berth_id| marina.reconcile_berth(berth_id))
        .collect()
}
