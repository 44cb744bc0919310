//! Shared fixtures for unit tests.

use crate::model::{Entity, Group, GroupRule, Objective};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Kind {
    Worker,
    Job,
    Manager,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Person {
    pub id: u32,
    pub kind: Kind,
    pub skill: f64,
}

impl Person {
    pub fn new(id: u32, kind: Kind, skill: f64) -> Self {
        Self { id, kind, skill }
    }
}

impl Entity for Person {
    type Category = Kind;

    fn category(&self) -> Kind {
        self.kind
    }
}

pub(crate) fn worker(id: u32, skill: f64) -> Person {
    Person::new(id, Kind::Worker, skill)
}

pub(crate) fn job(id: u32, skill: f64) -> Person {
    Person::new(id, Kind::Job, skill)
}

/// Workers and jobs at `(1, 1)`, statistic `|worker.skill - job.skill|`.
pub(crate) fn rule_for(objective: Objective) -> GroupRule<Person> {
    let mut rule = GroupRule::<Person>::new();
    rule.set_cardinality(Kind::Worker, 1, 1)
        .and_then(|r| r.set_cardinality(Kind::Job, 1, 1))
        .expect("valid bounds");
    rule.set_objective(objective).add_statistic(|m| {
        let w = &m[&Kind::Worker][0];
        let j = &m[&Kind::Job][0];
        (w.skill - j.skill).abs()
    });
    rule
}

/// Workers at 10, 50, 90 and jobs at 15, 55, 85.
pub(crate) fn scenario() -> Vec<Person> {
    vec![
        worker(1, 10.0),
        worker(2, 50.0),
        worker(3, 90.0),
        job(1, 15.0),
        job(2, 55.0),
        job(3, 85.0),
    ]
}

/// `(worker skill, job skill)` of each pair, in group order.
pub(crate) fn skills(groups: &[Group<Person>]) -> Vec<(f64, f64)> {
    groups
        .iter()
        .map(|g| (g.members_of(Kind::Worker)[0].skill, g.members_of(Kind::Job)[0].skill))
        .collect()
}
