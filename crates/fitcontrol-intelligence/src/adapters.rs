// ABOUTME: Per-domain adapters choosing which compliance anchors feed streaks and trackers
// ABOUTME: Routines track each routine day; diets track meals plus one day-level record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use fitcontrol_core::models::{ComplianceAnchor, Plan, PlanDomain};

/// Domain-specific view of a plan for adherence purposes
pub trait DomainAdapter: Send + Sync {
    /// Domain handled by this adapter
    fn domain(&self) -> PlanDomain;

    /// Anchors whose records make up the streak and calendar log
    fn streak_anchors(&self, plan: &Plan) -> Vec<ComplianceAnchor>;

    /// Day-level anchor the tracker maintains next to the unit records, if any
    fn day_anchor(&self, plan: &Plan) -> Option<ComplianceAnchor>;
}

/// Routine domain: each routine day is tracked and drives the streak
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutineAdapter;

impl DomainAdapter for RoutineAdapter {
    fn domain(&self) -> PlanDomain {
        PlanDomain::Routine
    }

    fn streak_anchors(&self, plan: &Plan) -> Vec<ComplianceAnchor> {
        plan.units
            .iter()
            .map(|unit| ComplianceAnchor::unit(unit.id))
            .collect()
    }

    fn day_anchor(&self, _plan: &Plan) -> Option<ComplianceAnchor> {
        None
    }
}

/// Diet domain: meals are tracked individually, the streak follows the day record
#[derive(Debug, Clone, Copy, Default)]
pub struct DietAdapter;

impl DomainAdapter for DietAdapter {
    fn domain(&self) -> PlanDomain {
        PlanDomain::Diet
    }

    fn streak_anchors(&self, plan: &Plan) -> Vec<ComplianceAnchor> {
        vec![ComplianceAnchor::plan(plan.id)]
    }

    fn day_anchor(&self, plan: &Plan) -> Option<ComplianceAnchor> {
        Some(ComplianceAnchor::plan(plan.id))
    }
}

static ROUTINE: RoutineAdapter = RoutineAdapter;
static DIET: DietAdapter = DietAdapter;

/// Adapter for `domain`
#[must_use]
pub fn adapter_for(domain: PlanDomain) -> &'static dyn DomainAdapter {
    match domain {
        PlanDomain::Routine => &ROUTINE,
        PlanDomain::Diet => &DIET,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fitcontrol_core::models::{AnchorKind, ScheduledUnit, WeekdayLabel};
    use uuid::Uuid;

    fn plan(domain: PlanDomain) -> Plan {
        let plan_id = Uuid::new_v4();
        Plan {
            id: plan_id,
            user_id: Uuid::new_v4(),
            domain,
            name: "Plan".to_owned(),
            is_active: true,
            created_at: Utc::now(),
            units: [WeekdayLabel::Monday, WeekdayLabel::Thursday]
                .into_iter()
                .map(|weekday| ScheduledUnit {
                    id: Uuid::new_v4(),
                    plan_id,
                    weekday,
                    label: None,
                    scheduled_time: None,
                    position: 0,
                    activities: Vec::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_routine_streak_follows_units() {
        let plan = plan(PlanDomain::Routine);
        let adapter = adapter_for(PlanDomain::Routine);
        let anchors = adapter.streak_anchors(&plan);

        assert_eq!(adapter.domain(), PlanDomain::Routine);
        assert_eq!(anchors.len(), 2);
        assert!(anchors.iter().all(|a| a.kind == AnchorKind::Unit));
        assert!(adapter.day_anchor(&plan).is_none());
    }

    #[test]
    fn test_diet_streak_follows_day_record() {
        let plan = plan(PlanDomain::Diet);
        let adapter = adapter_for(PlanDomain::Diet);

        assert_eq!(
            adapter.streak_anchors(&plan),
            vec![ComplianceAnchor::plan(plan.id)]
        );
        assert_eq!(adapter.day_anchor(&plan), Some(ComplianceAnchor::plan(plan.id)));
    }
}
