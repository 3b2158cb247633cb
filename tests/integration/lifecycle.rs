//! Integration tests for systems running against a storage.

use bento::prelude::*;
use bento::runtime::demo::{DemoConfig, Position, Velocity, run_demo};

#[derive(Clone, Debug, PartialEq)]
struct Age(u64);
impl Component for Age {}

/// Ages every entity by one each tick and removes those past `limit`.
struct Aging {
    limit: u64,
}

impl System for Aging {
    fn name(&self) -> &str {
        "aging"
    }

    fn start(&mut self, storage: &mut Storage, _ctx: &TickContext) -> Result<()> {
        for age in 0..5 {
            storage.create((Age(age),));
        }
        Ok(())
    }

    fn update(&mut self, storage: &mut Storage, _ctx: &TickContext) -> Result<()> {
        let limit = self.limit;
        for (_, age) in storage.select_mut::<Age>() {
            age.0 += 1;
        }
        storage.batch(|storage, buffer| {
            for (entity, (age,)) in storage.select::<(Age,)>() {
                if age.0 > limit {
                    buffer.destroy(entity);
                }
            }
        })
    }
}

/// Fails on stop if any entity remains.
struct RequireEmpty;

impl System for RequireEmpty {
    fn stop(&mut self, storage: &mut Storage, _ctx: &TickContext) -> Result<()> {
        if storage.is_empty() {
            Ok(())
        } else {
            Err(Error::system("require-empty", format!("{} left", storage.len())))
        }
    }
}

#[test]
fn aging_removes_entities_over_time() {
    let mut schedule = Schedule::new().with_system(Aging { limit: 5 });
    let mut storage = Storage::new();
    let mut ctx = TickContext::default();

    schedule.start(&mut storage, &ctx).unwrap();
    assert_eq!(storage.len(), 5);

    ctx.advance();
    schedule.update(&mut storage, &ctx).unwrap();
    // Ages 1..=5 remain.
    assert_eq!(storage.len(), 5);

    ctx.advance();
    schedule.update(&mut storage, &ctx).unwrap();
    // Ages 2..=6, and 6 is over the limit.
    assert_eq!(storage.len(), 4);
}

#[test]
fn stop_hook_error_carries_system_name() {
    let mut schedule = Schedule::new()
        .with_system(Aging { limit: 100 })
        .with_system(RequireEmpty);
    let mut storage = Storage::new();
    let ctx = TickContext::default();

    schedule.start(&mut storage, &ctx).unwrap();
    let err = schedule.stop(&mut storage, &ctx).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::System { ref message, .. } if message == "5 left"));
    assert!(
        err.context
            .and_then(|c| c.operation)
            .is_some_and(|op| op.ends_with("RequireEmpty.stop"))
    );
}

#[test]
fn demo_population_is_queryable_through_the_facade() {
    let storage = run_demo(&DemoConfig::default().with_report_every(0)).unwrap();
    let moving = storage.view(Filter::has::<Velocity>());
    assert_eq!(moving.select::<(Position, Velocity)>().count(), moving.len());
    assert_eq!(storage.len(), 10);
}
