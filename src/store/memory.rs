//! # In-Memory User Store
//!
//! An ordered sequence of user records. Iteration order is insertion order;
//! updates happen in place and deletion removes the entry where it sits.
//!
//! The store is a plain single-owner value. Callers that share it across
//! tasks wrap it in a lock and hold the write guard for a whole
//! check-then-mutate sequence (see `http_server::state::AppState`).

use super::errors::{StoreError, StoreResult};
use super::user::{seed_users, NewUser, User, UserPatch};

/// In-memory user store
#[derive(Debug, Clone)]
pub struct UserStore {
    users: Vec<User>,

    /// Next id to hand out. Only ever grows, so ids are not reused.
    next_id: u64,
}

impl UserStore {
    /// Create a store with no records
    pub fn empty() -> Self {
        Self::from_users(Vec::new())
    }

    /// Create a store holding the seed records
    pub fn seeded() -> Self {
        Self::from_users(seed_users())
    }

    /// Create a store from existing records, continuing ids after the largest
    pub fn from_users(users: Vec<User>) -> Self {
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self { users, next_id }
    }

    // ==================
    // Primitives
    // ==================

    /// All records in insertion order
    pub fn list(&self) -> &[User] {
        &self.users
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// First record matching `predicate`
    pub fn find<P>(&self, predicate: P) -> Option<&User>
    where
        P: Fn(&User) -> bool,
    {
        self.users.iter().find(|&u| predicate(u))
    }

    /// Position of the first record matching `predicate`
    pub fn find_index<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(&User) -> bool,
    {
        self.users.iter().position(predicate)
    }

    /// Mutable access to the record at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut User> {
        self.users.get_mut(index)
    }

    /// Append a record
    pub fn insert(&mut self, user: User) {
        self.users.push(user);
    }

    /// Remove and return the record at `index`, or `None` when out of range
    pub fn remove_at(&mut self, index: usize) -> Option<User> {
        if index < self.users.len() {
            Some(self.users.remove(index))
        } else {
            None
        }
    }

    /// Allocate the next id
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Whether `email` belongs to a record other than the one at `except`
    pub fn email_taken(&self, email: &str, except: Option<usize>) -> bool {
        self.users
            .iter()
            .enumerate()
            .any(|(i, u)| u.email == email && Some(i) != except)
    }

    // ==================
    // Operations
    // ==================

    /// Records whose name or email contains `needle`, in insertion order.
    /// `None` returns every record.
    pub fn search(&self, needle: Option<&str>) -> Vec<&User> {
        match needle {
            Some(needle) => self.users.iter().filter(|u| u.matches(needle)).collect(),
            None => self.users.iter().collect(),
        }
    }

    /// Look up a record by id
    pub fn get(&self, id: u64) -> StoreResult<&User> {
        self.find(|u| u.id == id).ok_or(StoreError::NotFound(id))
    }

    /// Append a new record, rejecting duplicate emails
    pub fn create(&mut self, new_user: NewUser) -> StoreResult<User> {
        if self.email_taken(&new_user.email, None) {
            return Err(StoreError::EmailTaken(new_user.email));
        }

        let user = User {
            id: self.next_id(),
            name: new_user.name,
            email: new_user.email,
            age: new_user.age,
        };
        self.insert(user.clone());
        Ok(user)
    }

    /// Overwrite the provided fields of the record with `id`
    pub fn update(&mut self, id: u64, patch: UserPatch) -> StoreResult<User> {
        let index = self
            .find_index(|u| u.id == id)
            .ok_or(StoreError::NotFound(id))?;

        if let Some(email) = &patch.email {
            if self.email_taken(email, Some(index)) {
                return Err(StoreError::EmailTaken(email.clone()));
            }
        }

        let user = self.get_mut(index).ok_or(StoreError::NotFound(id))?;
        user.apply(patch);
        Ok(user.clone())
    }

    /// Remove the record with `id` and return it
    pub fn delete(&mut self, id: u64) -> StoreResult<User> {
        self.find_index(|u| u.id == id)
            .and_then(|index| self.remove_at(index))
            .ok_or(StoreError::NotFound(id))
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            age: None,
        }
    }

    #[test]
    fn test_seeded_store_lists_in_insertion_order() {
        let store = UserStore::seeded();
        let ids: Vec<u64> = store.list().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_find_and_find_index() {
        let store = UserStore::seeded();
        assert_eq!(store.find(|u| u.id == 2).map(|u| u.name.as_str()), Some("李四"));
        assert_eq!(store.find_index(|u| u.email == "wangwu@example.com"), Some(2));
        assert_eq!(store.find_index(|u| u.id == 42), None);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut store = UserStore::seeded();
        assert!(store.remove_at(3).is_none());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_create_assigns_next_id() {
        let mut store = UserStore::seeded();
        let user = store.create(new_user("X", "x@y.com")).unwrap();

        assert_eq!(user.id, 4);
        assert_eq!(store.list().last(), Some(&user));
    }

    #[test]
    fn test_create_rejects_duplicate_email() {
        let mut store = UserStore::seeded();
        let err = store
            .create(new_user("Dup", "lisi@example.com"))
            .unwrap_err();

        assert_eq!(err, StoreError::EmailTaken("lisi@example.com".to_string()));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut store = UserStore::seeded();
        store.delete(3).unwrap();

        let user = store.create(new_user("Y", "y@z.com")).unwrap();
        assert_eq!(user.id, 4);

        store.delete(4).unwrap();
        let user = store.create(new_user("Z", "z@z.com")).unwrap();
        assert_eq!(user.id, 5);
    }

    #[test]
    fn test_update_keeps_position() {
        let mut store = UserStore::seeded();
        store
            .update(
                1,
                UserPatch {
                    name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(store.list()[0].name, "Renamed");
        assert_eq!(store.list()[0].id, 1);
    }

    #[test]
    fn test_update_allows_own_email() {
        let mut store = UserStore::seeded();
        let patch = UserPatch {
            email: Some("zhangsan@example.com".to_string()),
            ..Default::default()
        };
        assert!(store.update(1, patch).is_ok());
    }

    #[test]
    fn test_update_rejects_other_records_email() {
        let mut store = UserStore::seeded();
        let patch = UserPatch {
            email: Some("lisi@example.com".to_string()),
            age: Some(Some(99)),
            ..Default::default()
        };

        let err = store.update(1, patch).unwrap_err();
        assert!(matches!(err, StoreError::EmailTaken(_)));
        // Rejected updates leave the record untouched
        assert_eq!(store.get(1).unwrap().age, Some(25));
    }

    #[test]
    fn test_update_missing_id() {
        let mut store = UserStore::seeded();
        let err = store.update(99, UserPatch::default()).unwrap_err();
        assert_eq!(err, StoreError::NotFound(99));
    }

    #[test]
    fn test_delete_returns_removed_record() {
        let mut store = UserStore::seeded();
        let expected = store.get(2).unwrap().clone();

        let removed = store.delete(2).unwrap();
        assert_eq!(removed, expected);

        let ids: Vec<u64> = store.list().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(store.delete(2).unwrap_err(), StoreError::NotFound(2));
    }

    #[test]
    fn test_search() {
        let store = UserStore::seeded();
        let hits = store.search(Some("张"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        assert_eq!(store.search(Some("example.com")).len(), 3);
        assert_eq!(store.search(None).len(), 3);
        assert!(store.search(Some("nobody")).is_empty());
    }

    #[test]
    fn test_empty_store_starts_at_one() {
        let mut store = UserStore::empty();
        assert!(store.is_empty());
        assert_eq!(store.create(new_user("A", "a@b.co")).unwrap().id, 1);
    }
}
