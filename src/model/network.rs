use std::collections::{HashMap, HashSet};

use serde::Serialize;
use thiserror::Error;

use crate::model::person::{normalize_tags, Person, PersonId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("person already exists: {0}")]
    DuplicatePerson(PersonId),
    #[error("collaboration already exists: {0} -- {1}")]
    DuplicateCollaboration(PersonId, PersonId),
    #[error("unknown person: {0}")]
    UnknownPerson(PersonId),
    #[error("no collaboration between {0} and {1}")]
    UnknownCollaboration(PersonId, PersonId),
}

pub type Result<T> = std::result::Result<T, NetworkError>;

/// Unordered pair of distinct people, stored with the lexicographically
/// smaller id first so the same pair always compares equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Collaboration {
    pub a: PersonId,
    pub b: PersonId,
}

impl Collaboration {
    pub fn new(x: PersonId, y: PersonId) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    pub fn involves(&self, id: &PersonId) -> bool {
        &self.a == id || &self.b == id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RemovedPerson {
    pub person: Person,
    pub lost_collaborations: Vec<Collaboration>,
}

/// The in-memory social graph: people in insertion order plus normalized
/// collaboration pairs. Every mutation is immediate and all-or-nothing; a
/// failed operation leaves the model untouched.
#[derive(Debug, Default)]
pub struct Network {
    people: Vec<Person>,
    index: HashMap<PersonId, usize>,
    collaborations: Vec<Collaboration>,
    connected: HashSet<Collaboration>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn collaborations(&self) -> &[Collaboration] {
        &self.collaborations
    }

    pub fn node_count(&self) -> usize {
        self.people.len()
    }

    pub fn edge_count(&self) -> usize {
        self.collaborations.len()
    }

    pub fn person(&self, id: &PersonId) -> Option<&Person> {
        self.index.get(id).map(|&pos| &self.people[pos])
    }

    pub fn contains(&self, id: &PersonId) -> bool {
        self.index.contains_key(id)
    }

    /// Insertion position of a person, used as the deterministic tie-break
    /// for ranked views.
    pub fn position(&self, id: &PersonId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn is_connected(&self, x: &PersonId, y: &PersonId) -> bool {
        self.connected
            .contains(&Collaboration::new(x.clone(), y.clone()))
    }

    pub fn add_person(
        &mut self,
        id: &str,
        name: &str,
        program: &str,
        interests: &str,
    ) -> Result<&Person> {
        let (id, name, program) = validated_fields(id, name, program)?;
        if self.index.contains_key(&id) {
            return Err(NetworkError::DuplicatePerson(id));
        }

        let person = Person {
            id: id.clone(),
            name,
            program,
            interests: normalize_tags(interests),
        };
        let pos = self.people.len();
        self.index.insert(id, pos);
        self.people.push(person);
        Ok(&self.people[pos])
    }

    pub fn update_person(
        &mut self,
        id: &str,
        name: &str,
        program: &str,
        interests: &str,
    ) -> Result<&Person> {
        let (id, name, program) = validated_fields(id, name, program)?;
        let pos = *self
            .index
            .get(&id)
            .ok_or_else(|| NetworkError::UnknownPerson(id.clone()))?;

        let person = &mut self.people[pos];
        person.name = name;
        person.program = program;
        person.interests = normalize_tags(interests);
        Ok(&self.people[pos])
    }

    /// Remove a person and cascade-remove every incident collaboration.
    pub fn remove_person(&mut self, id: &PersonId) -> Result<RemovedPerson> {
        let pos = *self
            .index
            .get(id)
            .ok_or_else(|| NetworkError::UnknownPerson(id.clone()))?;

        let person = self.people.remove(pos);
        let (lost, kept): (Vec<_>, Vec<_>) = self
            .collaborations
            .drain(..)
            .partition(|collab| collab.involves(id));
        self.collaborations = kept;
        for collab in &lost {
            self.connected.remove(collab);
        }

        self.index.clear();
        for (pos, person) in self.people.iter().enumerate() {
            self.index.insert(person.id.clone(), pos);
        }

        Ok(RemovedPerson {
            person,
            lost_collaborations: lost,
        })
    }

    pub fn add_collaboration(&mut self, x: &PersonId, y: &PersonId) -> Result<&Collaboration> {
        if x == y {
            return Err(NetworkError::Validation(
                "a person cannot collaborate with themselves".to_string(),
            ));
        }
        for id in [x, y] {
            if !self.index.contains_key(id) {
                return Err(NetworkError::UnknownPerson(id.clone()));
            }
        }

        let collab = Collaboration::new(x.clone(), y.clone());
        if self.connected.contains(&collab) {
            return Err(NetworkError::DuplicateCollaboration(
                collab.a.clone(),
                collab.b.clone(),
            ));
        }

        self.connected.insert(collab.clone());
        let pos = self.collaborations.len();
        self.collaborations.push(collab);
        Ok(&self.collaborations[pos])
    }

    pub fn remove_collaboration(&mut self, x: &PersonId, y: &PersonId) -> Result<Collaboration> {
        let collab = Collaboration::new(x.clone(), y.clone());
        if !self.connected.remove(&collab) {
            return Err(NetworkError::UnknownCollaboration(
                collab.a.clone(),
                collab.b.clone(),
            ));
        }
        self.collaborations.retain(|existing| existing != &collab);
        Ok(collab)
    }
}

fn validated_fields(id: &str, name: &str, program: &str) -> Result<(PersonId, String, String)> {
    let id = id.trim();
    let name = name.trim();
    let program = program.trim();
    if id.is_empty() {
        return Err(NetworkError::Validation("id is required".to_string()));
    }
    if name.is_empty() {
        return Err(NetworkError::Validation("name is required".to_string()));
    }
    if program.is_empty() {
        return Err(NetworkError::Validation("program is required".to_string()));
    }
    Ok((PersonId::new(id), name.to_string(), program.to_string()))
}
