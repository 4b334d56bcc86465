//! Contact values produced by the collision world for a single tick.

use std::collections::HashSet;

use crate::category::Category;
use crate::types::{ColliderId, Vec3};

/// One side of a contact pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Body {
    Character,
    Static(ColliderId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactBody {
    pub body: Body,
    pub category: Category,
}

impl ContactBody {
    pub fn character() -> Self {
        Self {
            body: Body::Character,
            category: Category::Character,
        }
    }

    pub fn fixed(id: ColliderId, category: Category) -> Self {
        Self {
            body: Body::Static(id),
            category,
        }
    }
}

/// Whether the pair was already touching on the previous tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactPhase {
    Began,
    Continued,
}

/// A single overlapping pair detected this tick.
///
/// `normal` is a unit vector pointing from `first` toward `second`; moving `second`
/// along it by `depth` separates the pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactEvent {
    pub first: ContactBody,
    pub second: ContactBody,
    pub depth: f32,
    pub normal: Vec3,
    pub phase: ContactPhase,
}

impl ContactEvent {
    /// The non-character side and the direction that pushes the character out of it.
    ///
    /// Returns `None` if the character is not part of this pair.
    pub fn against_character(&self) -> Option<(ContactBody, Vec3)> {
        match (self.first.body, self.second.body) {
            (Body::Character, Body::Character) => None,
            (_, Body::Character) => Some((self.first, self.normal)),
            (Body::Character, _) => Some((self.second, -self.normal)),
            _ => None,
        }
    }
}

/// Remembers which colliders touched the character last tick so new contacts can be
/// told apart from continuing ones.
#[derive(Debug, Default)]
pub struct ContactTracker {
    touching: HashSet<ColliderId>,
}

impl ContactTracker {
    /// Stamp each contact with its phase and remember this tick's set.
    pub fn update(&mut self, contacts: &mut [ContactEvent]) {
        let mut now = HashSet::with_capacity(contacts.len());
        for contact in contacts.iter_mut() {
            let Some((other, _)) = contact.against_character() else {
                continue;
            };
            let Body::Static(id) = other.body else {
                continue;
            };
            contact.phase = if self.touching.contains(&id) {
                ContactPhase::Continued
            } else {
                ContactPhase::Began
            };
            now.insert(id);
        }
        self.touching = now;
    }

    pub fn forget(&mut self, id: ColliderId) {
        self.touching.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy_contact(id: u32) -> ContactEvent {
        ContactEvent {
            first: ContactBody::fixed(ColliderId(id), Category::Enemy),
            second: ContactBody::character(),
            depth: 0.1,
            normal: Vec3::x(),
            phase: ContactPhase::Began,
        }
    }

    #[test]
    fn against_character_flips_normal_when_character_is_first() {
        let mut contact = enemy_contact(1);
        std::mem::swap(&mut contact.first, &mut contact.second);
        let (other, push) = contact.against_character().unwrap();
        assert_eq!(other.body, Body::Static(ColliderId(1)));
        assert_eq!(push, -Vec3::x());
    }

    #[test]
    fn static_pairs_do_not_involve_the_character() {
        let mut contact = enemy_contact(1);
        contact.second = ContactBody::fixed(ColliderId(2), Category::Wall);
        assert_eq!(contact.against_character(), None);

        let mut tracker = ContactTracker::default();
        let mut contacts = [contact];
        tracker.update(&mut contacts);
        assert!(tracker.touching.is_empty());
    }

    #[test]
    fn tracker_marks_second_tick_as_continued() {
        let mut tracker = ContactTracker::default();

        let mut first = [enemy_contact(7)];
        tracker.update(&mut first);
        assert_eq!(first[0].phase, ContactPhase::Began);

        let mut second = [enemy_contact(7)];
        tracker.update(&mut second);
        assert_eq!(second[0].phase, ContactPhase::Continued);

        // Leaving and re-entering starts a new contact.
        tracker.update(&mut []);
        let mut third = [enemy_contact(7)];
        tracker.update(&mut third);
        assert_eq!(third[0].phase, ContactPhase::Began);
    }
}
