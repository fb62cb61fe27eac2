//! Property tests for the class session aggregate.
//!
//! Random sequences of bookings, cancellations and capacity changes must
//! leave the roster consistent after every step.

use proptest::prelude::*;

use class_roster::domain::foundation::{ClassSessionId, MemberId};
use class_roster::domain::roster::{ClassSession, ClassStatus, MemberRef, RosterError};

#[derive(Debug, Clone)]
enum Op {
    Book(u8),
    Cancel(u8),
    SetCapacity(u32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..12).prop_map(Op::Book),
        3 => (0u8..12).prop_map(Op::Cancel),
        1 => (1u32..8).prop_map(Op::SetCapacity),
    ]
}

fn member(n: u8) -> MemberRef {
    MemberRef::new(
        MemberId::new(format!("m{}", n)).unwrap(),
        format!("Member {}", n),
        format!("m{}@gym.test", n),
    )
    .unwrap()
}

fn roster_ids(members: &[MemberRef]) -> Vec<String> {
    members.iter().map(|m| m.id.as_str().to_string()).collect()
}

proptest! {
    #[test]
    fn roster_stays_consistent(capacity in 1u32..6, ops in prop::collection::vec(op(), 0..60)) {
        let mut class =
            ClassSession::schedule(ClassSessionId::new(), "Property Spin", capacity, None).unwrap();

        for op in ops {
            let before = class.clone();
            let result = match &op {
                Op::Book(n) => class.book(member(*n)).map(|_| ()),
                Op::Cancel(n) => class.cancel(&member(*n).id).map(|_| ()),
                Op::SetCapacity(c) => class.set_capacity(*c).map(|_| ()),
            };

            match result {
                Ok(()) => {}
                Err(RosterError::MemberNotOnRoster { .. }) => {
                    prop_assert_eq!(&class, &before);
                }
                Err(other) => prop_assert!(false, "unexpected error {:?} for {:?}", other, op),
            }

            prop_assert!(class.check_invariants().is_ok());

            let enrolled = class.enrolled().len();
            if enrolled < class.capacity() as usize {
                prop_assert!(class.waitlist().is_empty());
            }
            let expected = if enrolled >= class.capacity() as usize {
                ClassStatus::Full
            } else {
                ClassStatus::Scheduled
            };
            prop_assert_eq!(class.status(), expected);
        }
    }

    #[test]
    fn version_grows_only_on_real_changes(capacity in 1u32..4, ops in prop::collection::vec(op(), 0..40)) {
        let mut class =
            ClassSession::schedule(ClassSessionId::new(), "Versioned", capacity, None).unwrap();

        for op in ops {
            let version = class.version();
            let enrolled = roster_ids(class.enrolled());
            let waitlist = roster_ids(class.waitlist());
            let capacity = class.capacity();

            let _ = match op {
                Op::Book(n) => class.book(member(n)).map(|_| ()),
                Op::Cancel(n) => class.cancel(&member(n).id).map(|_| ()),
                Op::SetCapacity(c) => class.set_capacity(c).map(|_| ()),
            };

            let changed = roster_ids(class.enrolled()) != enrolled
                || roster_ids(class.waitlist()) != waitlist
                || class.capacity() != capacity;
            if changed {
                prop_assert_eq!(class.version(), version + 1);
            } else {
                prop_assert_eq!(class.version(), version);
            }
        }
    }

    #[test]
    fn promotion_preserves_arrival_order(capacity in 1u32..4, arrivals in 2u8..10) {
        let mut class =
            ClassSession::schedule(ClassSessionId::new(), "Fifo", capacity, None).unwrap();
        for n in 0..arrivals {
            class.book(member(n)).unwrap();
        }

        // Drain the front of the class one seat at a time.
        while let Some(first) = class.enrolled().first().cloned() {
            let waitlist_head = class.waitlist().first().cloned();
            let outcome = class.cancel(&first.id).unwrap();
            match waitlist_head {
                Some(head) => prop_assert_eq!(roster_ids(&outcome.promoted), vec![head.id.as_str().to_string()]),
                None => prop_assert!(outcome.promoted.is_empty()),
            }
            let order: Vec<u32> = class
                .enrolled()
                .iter()
                .chain(class.waitlist())
                .map(|m| m.id.as_str()[1..].parse().unwrap())
                .collect();
            let mut sorted = order.clone();
            sorted.sort_unstable();
            prop_assert_eq!(order, sorted);
        }
    }
}
