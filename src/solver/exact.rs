//! Exact minimum-sum assignment solver.

use super::bipartite::{solve_sides, Bipartition};
use super::types::Solver;
use crate::error::Result;
use crate::matching::solve_min_sum;
use crate::model::{Entity, Group, GroupRule, Objective};

/// Optimal one-to-one pairing minimizing the summed statistic.
///
/// Accepts rules with exactly two categories bounded `(1, 1)` and the
/// `minimize_sum_of_single_statistic` objective. When the sides differ in
/// size, the surplus entities of the larger side are left out.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactAssignment;

impl ExactAssignment {
    /// Registry name.
    pub const NAME: &'static str = "exact_assignment";
}

impl<E: Entity> Solver<E> for ExactAssignment {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn can_solve(&self, rule: &GroupRule<E>) -> bool {
        rule.is_one_to_one_bipartite() && rule.has_objective(Objective::MinimizeSum)
    }

    fn solve_from_entities(&self, rule: &GroupRule<E>, entities: &[E]) -> Result<Vec<Group<E>>> {
        let sides = Bipartition::from_entities(rule, entities)?;
        solve_sides(Self::NAME, rule, &sides, solve_min_sum)
    }

    fn solve_from_groups(&self, rule: &GroupRule<E>, groups: &[Group<E>]) -> Result<Vec<Group<E>>> {
        let sides = Bipartition::from_groups(rule, groups)?;
        solve_sides(Self::NAME, rule, &sides, solve_min_sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssignError;
    use crate::test_utils::{job, rule_for, scenario, skills, worker, Kind};

    #[test]
    fn test_can_solve() {
        let solver = ExactAssignment;
        assert!(Solver::<crate::test_utils::Person>::can_solve(
            &solver,
            &rule_for(Objective::MinimizeSum)
        ));
        assert!(!solver.can_solve(&rule_for(Objective::MinimizeMax)));

        let mut rule = rule_for(Objective::MinimizeSum);
        rule.set_cardinality(Kind::Job, 1, 2).unwrap();
        assert!(!solver.can_solve(&rule));

        let mut rule = rule_for(Objective::MinimizeSum);
        rule.set_arbitrary_objective_function(|s| s.iter().sum());
        assert!(!solver.can_solve(&rule));
    }

    #[test]
    fn test_worker_job_scenario() {
        let rule = rule_for(Objective::MinimizeSum);
        let groups = ExactAssignment.solve_from_entities(&rule, &scenario()).unwrap();

        assert_eq!(groups.len(), 3);
        let mut pairs = skills(&groups);
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        assert_eq!(pairs, vec![(10.0, 15.0), (50.0, 55.0), (90.0, 85.0)]);
        assert_eq!(rule.score(&groups), Some(15.0));
        for g in &groups {
            assert!(rule.validate(g).is_ok());
        }
    }

    #[test]
    fn test_unequal_sides_match_smaller() {
        let rule = rule_for(Objective::MinimizeSum);
        let entities = vec![
            worker(1, 10.0),
            worker(2, 50.0),
            worker(3, 90.0),
            job(1, 48.0),
        ];
        let groups = ExactAssignment.solve_from_entities(&rule, &entities).unwrap();
        assert_eq!(skills(&groups), vec![(50.0, 48.0)]);
    }

    #[test]
    fn test_validator_makes_infeasible() {
        let mut rule = rule_for(Objective::MinimizeSum);
        rule.add_validator(|_| false);
        let err = ExactAssignment
            .solve_from_entities(&rule, &scenario())
            .unwrap_err();
        assert_eq!(err, AssignError::NoFeasibleMatching { rows: 3, cols: 3 });
    }

    #[test]
    fn test_from_groups_same_result() {
        let rule = rule_for(Objective::MinimizeSum);
        let candidates = vec![
            Group::new().with(worker(1, 10.0)).with(job(3, 85.0)),
            Group::new().with(worker(2, 50.0)).with(job(1, 15.0)),
            Group::new().with(worker(3, 90.0)).with(job(2, 55.0)),
        ];
        let groups = ExactAssignment.solve_from_groups(&rule, &candidates).unwrap();
        assert_eq!(rule.score(&groups), Some(15.0));
    }
}
