//! End-to-end scenarios through the public API.

use u_assign::matching::{solve_min_sum, CostMatrix};
use u_assign::model::{Entity, Group, GroupRule};
use u_assign::solver::{
    build_cost_matrix_from_groups, recover_groups_from_groups, Solver, SolverRegistry,
    StableMarriage,
};
use u_assign::{optimize, AssignError, Instance, Optimizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Side {
    Worker,
    Job,
}

#[derive(Debug, Clone, PartialEq)]
struct Person {
    name: &'static str,
    side: Side,
    skill: f64,
}

impl Entity for Person {
    type Category = Side;
    fn category(&self) -> Side {
        self.side
    }
}

fn worker(name: &'static str, skill: f64) -> Person {
    Person {
        name,
        side: Side::Worker,
        skill,
    }
}

fn job(name: &'static str, skill: f64) -> Person {
    Person {
        name,
        side: Side::Job,
        skill,
    }
}

fn distance_rule(objective: &str) -> GroupRule<Person> {
    let mut rule = GroupRule::<Person>::new();
    rule.set_cardinality(Side::Worker, 1, 1)
        .unwrap()
        .set_cardinality(Side::Job, 1, 1)
        .unwrap()
        .set_optimized_objective_function(objective)
        .unwrap()
        .add_statistic(|m| (m[&Side::Worker][0].skill - m[&Side::Job][0].skill).abs());
    rule
}

fn scenario() -> Vec<Instance<Person>> {
    vec![
        worker("w10", 10.0),
        worker("w50", 50.0),
        worker("w90", 90.0),
        job("j15", 15.0),
        job("j55", 55.0),
        job("j85", 85.0),
    ]
    .into_iter()
    .map(Instance::Entity)
    .collect()
}

fn names(groups: &[Group<Person>]) -> Vec<(&'static str, &'static str)> {
    let mut pairs: Vec<_> = groups
        .iter()
        .map(|g| (g.members_of(Side::Worker)[0].name, g.members_of(Side::Job)[0].name))
        .collect();
    pairs.sort();
    pairs
}

#[test]
fn minimize_sum_pairs_nearest_skills() {
    let rule = distance_rule("minimize_sum_of_single_statistic");
    let groups = optimize(&rule, &scenario()).unwrap();

    assert_eq!(
        names(&groups),
        vec![("w10", "j15"), ("w50", "j55"), ("w90", "j85")]
    );
    assert_eq!(rule.score(&groups), Some(15.0));
    assert!(groups.iter().all(|g| rule.validate(g).is_ok()));
}

#[test]
fn minimize_max_bounds_worst_pair() {
    let rule = distance_rule("minimize_max_of_single_statistic");
    let groups = optimize(&rule, &scenario()).unwrap();

    assert_eq!(groups.len(), 3);
    assert_eq!(rule.score(&groups), Some(5.0));
}

#[test]
fn maximize_sum_uses_genetic_solver() {
    let rule = distance_rule("maximize_sum_of_single_statistic");
    let registry = SolverRegistry::with_defaults();
    assert_eq!(registry.choose_solver(&rule).unwrap().name(), "genetic_assignment");

    let groups = Optimizer::new(registry).optimize(&rule, &scenario()).unwrap();
    assert_eq!(rule.score(&groups), Some(-155.0));
}

#[test]
fn cardinality_violation_names_category() {
    let mut rule = GroupRule::<Person>::new();
    rule.set_cardinality(Side::Worker, 1, 1)
        .unwrap()
        .set_cardinality(Side::Job, 2, 2)
        .unwrap();

    let group = Group::new().with(worker("w", 1.0)).with(job("j", 2.0));
    assert_eq!(
        rule.validate(&group).unwrap_err(),
        AssignError::CardinalityViolation {
            category: "Job".to_string(),
            found: 1,
            min: 2,
            max: 2,
        }
    );
}

#[test]
fn unknown_objective_name_is_rejected() {
    let mut rule = GroupRule::<Person>::new();
    assert_eq!(
        rule.set_optimized_objective_function("minimize_everything")
            .unwrap_err(),
        AssignError::UnknownObjective("minimize_everything".to_string())
    );
    assert!(rule.objective().name().is_none());
}

#[test]
fn no_solver_for_many_to_one_rule() {
    let mut rule = distance_rule("minimize_sum_of_single_statistic");
    rule.set_cardinality(Side::Job, 1, 2).unwrap();
    assert!(matches!(
        optimize(&rule, &scenario()),
        Err(AssignError::NoSolverFound { .. })
    ));
}

#[test]
fn mixed_input_is_an_error() {
    let rule = distance_rule("minimize_sum_of_single_statistic");
    let mut input = scenario();
    input.push(Instance::Group(Group::new().with(worker("w", 1.0)).with(job("j", 1.0))));
    assert!(matches!(
        optimize(&rule, &input),
        Err(AssignError::MixedInputNotSupported {
            groups: 1,
            entities: 6
        })
    ));
}

#[test]
fn groups_round_trip_through_cost_matrix() {
    let rule = distance_rule("minimize_sum_of_single_statistic");
    let candidates = vec![
        Group::new().with(worker("a", 0.0)).with(job("x", 30.0)),
        Group::new().with(worker("b", 30.0)).with(job("y", 1.0)),
        Group::new().with(worker("a", 0.0)).with(job("y", 1.0)),
    ];

    let matrix = build_cost_matrix_from_groups(&rule, &candidates).unwrap();
    assert_eq!((matrix.rows(), matrix.cols()), (2, 2));

    let matching = solve_min_sum(&matrix).unwrap();
    let groups = recover_groups_from_groups(&rule, &matching, &candidates).unwrap();
    assert_eq!(names(&groups), vec![("a", "y"), ("b", "x")]);
    assert_eq!(matching.total_cost(&matrix), 1.0);
}

#[test]
fn validators_exclude_pairs() {
    let mut rule = distance_rule("minimize_sum_of_single_statistic");
    rule.add_validator(|m| m[&Side::Worker][0].name != "w10" || m[&Side::Job][0].name != "j15");

    let groups = optimize(&rule, &scenario()).unwrap();
    assert!(!names(&groups).contains(&("w10", "j15")));
    assert!(groups.iter().all(|g| rule.validate(g).is_ok()));
}

#[test]
fn stable_marriage_without_objective() {
    let mut rule = GroupRule::<Person>::new();
    rule.set_cardinality(Side::Worker, 1, 1)
        .unwrap()
        .set_cardinality(Side::Job, 1, 1)
        .unwrap()
        .add_statistic(|m| (m[&Side::Worker][0].skill - m[&Side::Job][0].skill).abs());

    assert!(Solver::<Person>::can_solve(&StableMarriage, &rule));
    let groups = optimize(&rule, &scenario()).unwrap();
    assert_eq!(
        names(&groups),
        vec![("w10", "j15"), ("w50", "j55"), ("w90", "j85")]
    );
}

#[test]
fn custom_registry_order_wins() {
    struct Everything;

    impl Solver<Person> for Everything {
        fn name(&self) -> &str {
            "everything"
        }
        fn can_solve(&self, _: &GroupRule<Person>) -> bool {
            true
        }
        fn solve_from_entities(
            &self,
            _: &GroupRule<Person>,
            entities: &[Person],
        ) -> u_assign::Result<Vec<Group<Person>>> {
            Ok(vec![entities.iter().cloned().collect()])
        }
        fn solve_from_groups(
            &self,
            _: &GroupRule<Person>,
            groups: &[Group<Person>],
        ) -> u_assign::Result<Vec<Group<Person>>> {
            Ok(groups.to_vec())
        }
    }

    let rule = distance_rule("minimize_sum_of_single_statistic");
    let registry = SolverRegistry::new().with_solver(Everything);
    let groups = Optimizer::new(registry).optimize(&rule, &scenario()).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 6);
}

#[test]
fn forbidden_cells_force_alternative() {
    let inf = f64::INFINITY;
    let m = CostMatrix::from_rows(vec![vec![1.0, inf], vec![2.0, 100.0]]);
    let matching = solve_min_sum(&m).unwrap();
    assert_eq!(matching.pairs(), &[(0, 0), (1, 1)]);
}
