//! Wall penetration correction.

use crate::category::Category;
use crate::contact::ContactEvent;
use crate::types::Vec3;

/// Horizontal offset that moves the character out of the deepest wall.
///
/// Only wall contacts involving the character count. The deepest one wins and the first
/// seen wins ties. The vertical component is zeroed so walls never lift the character.
pub fn resolve_penetration(contacts: &[ContactEvent]) -> Option<Vec3> {
    let mut deepest: Option<(f32, Vec3)> = None;
    for contact in contacts {
        let Some((other, push)) = contact.against_character() else {
            continue;
        };
        if other.category != Category::Wall {
            continue;
        }
        if deepest.is_none_or(|(depth, _)| contact.depth > depth) {
            deepest = Some((contact.depth, push));
        }
    }

    deepest.map(|(depth, push)| {
        let mut correction = push * depth;
        correction.y = 0.0;
        correction
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{ContactBody, ContactPhase};
    use crate::types::ColliderId;

    fn wall(id: u32, depth: f32, normal: Vec3) -> ContactEvent {
        ContactEvent {
            first: ContactBody::fixed(ColliderId(id), Category::Wall),
            second: ContactBody::character(),
            depth,
            normal,
            phase: ContactPhase::Began,
        }
    }

    #[test]
    fn deepest_wall_wins_and_vertical_is_dropped() {
        let contacts = [
            wall(1, 0.1, Vec3::new(0.0, 0.0, 1.0)),
            wall(2, 0.3, Vec3::new(0.6, 0.8, 0.0)),
        ];
        let correction = resolve_penetration(&contacts).unwrap();
        assert!((correction.x - 0.18).abs() < 1.0e-6);
        assert_eq!(correction.y, 0.0);
        assert_eq!(correction.z, 0.0);
    }

    #[test]
    fn ties_keep_the_first_contact() {
        let contacts = [
            wall(1, 0.2, Vec3::new(1.0, 0.0, 0.0)),
            wall(2, 0.2, Vec3::new(0.0, 0.0, 1.0)),
        ];
        let correction = resolve_penetration(&contacts).unwrap();
        assert!((correction - Vec3::new(0.2, 0.0, 0.0)).norm() < 1.0e-6);
    }

    #[test]
    fn character_first_flips_the_push() {
        let mut contact = wall(1, 0.5, Vec3::new(1.0, 0.0, 0.0));
        std::mem::swap(&mut contact.first, &mut contact.second);
        let correction = resolve_penetration(&[contact]).unwrap();
        assert!((correction - Vec3::new(-0.5, 0.0, 0.0)).norm() < 1.0e-6);
    }

    #[test]
    fn non_wall_contacts_are_ignored() {
        let mut contact = wall(1, 0.5, Vec3::x());
        contact.first.category = Category::Enemy;
        assert_eq!(resolve_penetration(&[contact]), None);
        assert_eq!(resolve_penetration(&[]), None);
    }

    #[test]
    fn pairs_without_the_character_are_ignored() {
        let mut contact = wall(1, 0.5, Vec3::x());
        contact.second = ContactBody::fixed(ColliderId(2), Category::Wall);
        assert_eq!(resolve_penetration(&[contact]), None);
    }
}
