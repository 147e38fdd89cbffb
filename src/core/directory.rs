use crate::config::DirectoryOptions;
use crate::core::codec;
use crate::domain::model::Subscriber;
use crate::domain::ports::Store;
use crate::utils::error::{DirectoryError, Result};

/// Durability of a mutation that already took effect in memory.
#[derive(Debug)]
#[must_use]
pub enum SaveStatus {
    /// The store holds the new state.
    Saved,
    /// Not written; the next successful save will carry the change.
    Deferred,
    /// The write failed. The change stands in memory only.
    Failed(DirectoryError),
}

impl SaveStatus {
    pub fn is_durable(&self) -> bool {
        matches!(self, Self::Saved)
    }

    /// Message the caller should show, if any.
    pub fn warning(&self) -> Option<String> {
        match self {
            Self::Saved => None,
            Self::Deferred => Some("Change not yet saved to the directory file.".to_string()),
            Self::Failed(e) => Some(format!("Change kept in memory but not saved: {}", e)),
        }
    }
}

/// Subscribers kept sorted by `surname + " " + given_name` and mirrored to a
/// backing store.
pub struct Directory<S: Store> {
    store: S,
    options: DirectoryOptions,
    subscribers: Vec<Subscriber>,
}

impl<S: Store> Directory<S> {
    /// Binds an empty directory to `store`. Nothing is read until
    /// [`Directory::load_from_file`].
    pub fn new(store: S, options: DirectoryOptions) -> Self {
        Self {
            store,
            options,
            subscribers: Vec::new(),
        }
    }

    /// Binds to `store` and loads whatever it holds.
    pub fn open(store: S, options: DirectoryOptions) -> Self {
        let mut directory = Self::new(store, options);
        directory.load_from_file();
        directory
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn options(&self) -> DirectoryOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subscriber> {
        self.subscribers.iter()
    }

    /// First subscriber with exactly this surname and name.
    pub fn find(&self, surname: &str, given_name: &str) -> Option<&Subscriber> {
        self.subscribers
            .iter()
            .find(|s| s.matches(surname, given_name))
    }

    fn position(&self, surname: &str, given_name: &str) -> Option<usize> {
        self.subscribers
            .iter()
            .position(|s| s.matches(surname, given_name))
    }

    /// Inserts after every entry whose key is less than or equal to the new
    /// one, so equal keys keep arrival order.
    fn insert_sorted(&mut self, subscriber: Subscriber) -> usize {
        let index = self.subscribers.partition_point(|existing| {
            existing.cmp_key(subscriber.surname(), subscriber.given_name()).is_le()
        });
        self.subscribers.insert(index, subscriber);
        index
    }

    fn persist(&self) -> SaveStatus {
        match self.save_to_file() {
            Ok(()) => SaveStatus::Saved,
            Err(e) => {
                tracing::warn!("Failed to save directory to {}: {}", self.store.describe(), e);
                SaveStatus::Failed(e)
            }
        }
    }

    fn not_found(surname: &str, given_name: &str) -> DirectoryError {
        DirectoryError::NotFound {
            surname: surname.to_string(),
            given_name: given_name.to_string(),
        }
    }

    /// Adds a subscriber holding one number. Duplicate names are kept as
    /// separate entries.
    pub fn add_user(&mut self, surname: &str, given_name: &str, phone_number: &str) -> SaveStatus {
        let index = self.insert_sorted(Subscriber::with_phone_number(
            surname,
            given_name,
            phone_number,
        ));
        tracing::debug!("Added {} {} at position {}", surname, given_name, index + 1);
        self.persist()
    }

    pub fn delete_user(&mut self, surname: &str, given_name: &str) -> Result<SaveStatus> {
        if self.subscribers.is_empty() {
            return Err(DirectoryError::EmptyDirectory);
        }

        let index = self
            .position(surname, given_name)
            .ok_or_else(|| Self::not_found(surname, given_name))?;
        self.subscribers.remove(index);
        tracing::debug!("Deleted {} {}", surname, given_name);
        Ok(self.persist())
    }

    pub fn add_phone_number(
        &mut self,
        surname: &str,
        given_name: &str,
        phone_number: &str,
    ) -> Result<SaveStatus> {
        let index = self
            .position(surname, given_name)
            .ok_or_else(|| Self::not_found(surname, given_name))?;
        self.subscribers[index].add_phone_number(phone_number);
        tracing::debug!("Added {} to {} {}", phone_number, surname, given_name);
        Ok(self.persist())
    }

    /// Removes the first matching number. The store is only rewritten when
    /// `persist_on_remove` is set; otherwise the result is `Deferred`.
    pub fn remove_phone_number(
        &mut self,
        surname: &str,
        given_name: &str,
        phone_number: &str,
    ) -> Result<SaveStatus> {
        let index = self
            .position(surname, given_name)
            .ok_or_else(|| Self::not_found(surname, given_name))?;

        if !self.subscribers[index].remove_phone_number(phone_number) {
            return Err(DirectoryError::ValueNotFound {
                surname: surname.to_string(),
                given_name: given_name.to_string(),
                phone_number: phone_number.to_string(),
            });
        }
        tracing::debug!("Removed {} from {} {}", phone_number, surname, given_name);

        if self.options.persist_on_remove {
            Ok(self.persist())
        } else {
            Ok(SaveStatus::Deferred)
        }
    }

    /// Numbers of the first matching subscriber. An empty slice means the
    /// subscriber exists but has no numbers.
    pub fn display_phone_numbers(&self, surname: &str, given_name: &str) -> Result<&[String]> {
        self.find(surname, given_name)
            .map(Subscriber::phone_numbers)
            .ok_or_else(|| Self::not_found(surname, given_name))
    }

    /// 1-based, sorted listing. An empty directory is reported as
    /// `EmptyDirectory` instead of an empty list.
    pub fn display_all(&self) -> Result<Vec<(usize, &Subscriber)>> {
        if self.subscribers.is_empty() {
            return Err(DirectoryError::EmptyDirectory);
        }

        Ok(self
            .subscribers
            .iter()
            .enumerate()
            .map(|(i, s)| (i + 1, s))
            .collect())
    }

    /// Replaces the in-memory contents with what the store holds. A missing
    /// or unreadable store leaves the directory empty; bad lines are skipped
    /// and lines that are not valid UTF-8 are decoded lossily.
    /// Returns the number of subscribers loaded.
    ///
    /// Each line becomes one whole record, inserted after any entry with the
    /// same name. When a name appears on several lines every line stays its
    /// own subscriber; the numbers of later lines are not merged into the
    /// first match the way `add_user` followed by `add_phone_number` would.
    /// This keeps a save followed by a load an exact round trip.
    pub fn load_from_file(&mut self) -> usize {
        self.subscribers.clear();

        let contents = match self.store.read() {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                tracing::debug!("No directory file at {}, starting empty", self.store.describe());
                return 0;
            }
            Err(e) => {
                tracing::warn!("Could not read {}: {}", self.store.describe(), e);
                return 0;
            }
        };

        let (records, failures) = codec::decode(&contents);
        for failure in &failures {
            tracing::warn!("Skipping record in {}: {}", self.store.describe(), failure);
        }

        for subscriber in records {
            self.insert_sorted(subscriber);
        }

        tracing::debug!(
            "Loaded {} subscribers from {}",
            self.subscribers.len(),
            self.store.describe()
        );
        self.subscribers.len()
    }

    /// Rewrites the whole store from the current sorted contents.
    pub fn save_to_file(&self) -> Result<()> {
        let (contents, skipped) = codec::encode(&self.subscribers, self.options.empty_subscribers);
        self.store.write(&contents)?;
        tracing::debug!(
            "Saved {} subscribers to {}",
            self.subscribers.len() - skipped,
            self.store.describe()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::config::EmptySubscriberPolicy;

    fn directory() -> Directory<MemoryStore> {
        Directory::new(MemoryStore::new(), DirectoryOptions::default())
    }

    fn names(directory: &Directory<MemoryStore>) -> Vec<String> {
        directory.iter().map(Subscriber::full_name).collect()
    }

    #[test]
    fn test_add_user_keeps_sorted_order() {
        let mut dir = directory();
        for (surname, name) in [("Doe", "Jane"), ("Adams", "Tom"), ("Smith", "Bob"), ("Doe", "Al")] {
            assert!(dir.add_user(surname, name, "1").is_durable());
        }

        assert_eq!(names(&dir), ["Adams Tom", "Doe Al", "Doe Jane", "Smith Bob"]);
        assert_eq!(dir.store().write_count(), 4);
    }

    #[test]
    fn test_first_add_is_persisted() {
        let mut dir = directory();
        assert!(dir.add_user("Doe", "Jane", "5551234").is_durable());
        assert_eq!(dir.store().contents().as_deref(), Some("Doe Jane 5551234\n"));
    }

    #[test]
    fn test_equal_keys_append_after_existing() {
        let mut dir = directory();
        let _ = dir.add_user("Doe", "Jane", "111");
        let _ = dir.add_user("Adams", "Tom", "000");
        let _ = dir.add_user("Doe", "Jane", "222");

        assert_eq!(dir.len(), 3);
        let listing = dir.display_all().unwrap();
        assert_eq!(listing[1].1.phone_numbers(), ["111"]);
        assert_eq!(listing[2].1.phone_numbers(), ["222"]);

        // lookups hit the first of the duplicates
        assert_eq!(dir.display_phone_numbers("Doe", "Jane").unwrap(), ["111"]);
    }

    #[test]
    fn test_delete_user_errors() {
        let mut dir = directory();
        assert!(matches!(
            dir.delete_user("Doe", "Jane"),
            Err(DirectoryError::EmptyDirectory)
        ));

        let _ = dir.add_user("Doe", "Jane", "111");
        assert!(matches!(
            dir.delete_user("Nobody", "Home"),
            Err(DirectoryError::NotFound { .. })
        ));
        assert_eq!(dir.len(), 1);

        assert!(dir.delete_user("Doe", "Jane").unwrap().is_durable());
        assert!(dir.is_empty());
        assert_eq!(dir.store().contents().as_deref(), Some(""));
    }

    #[test]
    fn test_add_phone_number_allows_duplicates() {
        let mut dir = directory();
        let _ = dir.add_user("Doe", "Jane", "111");
        assert!(dir.add_phone_number("Doe", "Jane", "222").unwrap().is_durable());
        let _ = dir.add_phone_number("Doe", "Jane", "111").unwrap();

        assert_eq!(dir.display_phone_numbers("Doe", "Jane").unwrap(), ["111", "222", "111"]);
        assert!(matches!(
            dir.add_phone_number("doe", "jane", "333"),
            Err(DirectoryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_remove_phone_number_is_deferred_by_default() {
        let mut dir = directory();
        let _ = dir.add_user("Doe", "Jane", "111");
        let _ = dir.add_phone_number("Doe", "Jane", "222").unwrap();
        let writes = dir.store().write_count();

        let status = dir.remove_phone_number("Doe", "Jane", "111").unwrap();
        assert!(matches!(status, SaveStatus::Deferred));
        assert!(status.warning().is_some());
        assert_eq!(dir.store().write_count(), writes);
        assert_eq!(dir.store().contents().as_deref(), Some("Doe Jane 111 222\n"));
        assert_eq!(dir.display_phone_numbers("Doe", "Jane").unwrap(), ["222"]);

        dir.save_to_file().unwrap();
        assert_eq!(dir.store().contents().as_deref(), Some("Doe Jane 222\n"));
    }

    #[test]
    fn test_remove_phone_number_persists_when_configured() {
        let options = DirectoryOptions {
            persist_on_remove: true,
            ..DirectoryOptions::default()
        };
        let mut dir = Directory::new(MemoryStore::new(), options);
        let _ = dir.add_user("Doe", "Jane", "111");
        let _ = dir.add_phone_number("Doe", "Jane", "222").unwrap();

        assert!(dir.remove_phone_number("Doe", "Jane", "222").unwrap().is_durable());
        assert_eq!(dir.store().contents().as_deref(), Some("Doe Jane 111\n"));
    }

    #[test]
    fn test_remove_phone_number_errors_leave_state() {
        let mut dir = directory();
        let _ = dir.add_user("Doe", "Jane", "111");

        assert!(matches!(
            dir.remove_phone_number("Doe", "Jane", "999"),
            Err(DirectoryError::ValueNotFound { .. })
        ));
        assert!(matches!(
            dir.remove_phone_number("Roe", "Jane", "111"),
            Err(DirectoryError::NotFound { .. })
        ));
        assert_eq!(dir.display_phone_numbers("Doe", "Jane").unwrap(), ["111"]);
    }

    #[test]
    fn test_subscriber_with_no_numbers_remains() {
        let mut dir = directory();
        let _ = dir.add_user("Doe", "Jane", "111");
        let _ = dir.remove_phone_number("Doe", "Jane", "111").unwrap();

        assert_eq!(dir.len(), 1);
        assert!(dir.display_phone_numbers("Doe", "Jane").unwrap().is_empty());

        dir.save_to_file().unwrap();
        assert_eq!(dir.store().contents().as_deref(), Some(""));
    }

    #[test]
    fn test_name_only_policy_writes_empty_subscriber() {
        let options = DirectoryOptions {
            empty_subscribers: EmptySubscriberPolicy::NameOnly,
            ..DirectoryOptions::default()
        };
        let mut dir = Directory::new(MemoryStore::new(), options);
        let _ = dir.add_user("Doe", "Jane", "111");
        let _ = dir.remove_phone_number("Doe", "Jane", "111").unwrap();
        dir.save_to_file().unwrap();

        assert_eq!(dir.store().contents().as_deref(), Some("Doe Jane\n"));
        assert_eq!(dir.load_from_file(), 1);
        assert!(dir.find("Doe", "Jane").unwrap().is_empty());
    }

    #[test]
    fn test_display_all_on_empty_directory() {
        let dir = directory();
        assert!(matches!(dir.display_all(), Err(DirectoryError::EmptyDirectory)));
    }

    #[test]
    fn test_failed_save_is_reported_not_swallowed() {
        let mut dir = Directory::new(MemoryStore::failing(), DirectoryOptions::default());

        let status = dir.add_user("Doe", "Jane", "111");
        assert!(matches!(status, SaveStatus::Failed(DirectoryError::IoError(_))));
        assert!(status.warning().unwrap().contains("not saved"));
        assert_eq!(dir.len(), 1);

        let status = dir.add_phone_number("Doe", "Jane", "222").unwrap();
        assert!(!status.is_durable());
        assert_eq!(dir.display_phone_numbers("Doe", "Jane").unwrap(), ["111", "222"]);
    }

    #[test]
    fn test_load_sorts_unsorted_file_and_skips_bad_lines() {
        let store = MemoryStore::with_contents("Smith Bob 3\nBroken\nAdams Tom 1 2\n\nDoe Jane 4\n");
        let dir = Directory::open(store, DirectoryOptions::default());

        assert_eq!(names(&dir), ["Adams Tom", "Doe Jane", "Smith Bob"]);
        assert_eq!(dir.display_phone_numbers("Adams", "Tom").unwrap(), ["1", "2"]);
        // loading never writes back
        assert_eq!(dir.store().write_count(), 0);
    }

    #[test]
    fn test_load_keeps_duplicate_lines_separate() {
        let store = MemoryStore::with_contents("Doe Jane 1 2\nDoe Jane 3 4\n");
        let dir = Directory::open(store, DirectoryOptions::default());

        let listing = dir.display_all().unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].1.phone_numbers(), ["1", "2"]);
        assert_eq!(listing[1].1.phone_numbers(), ["3", "4"]);
    }

    #[test]
    fn test_unencodable_subscriber_is_not_written() {
        let mut dir = directory();
        let _ = dir.add_user("Adams", "Tom", "5550000");
        let _ = dir.add_user("Van Dyke", "Dick", "111");
        let _ = dir.add_phone_number("Adams", "Tom", "").unwrap();

        assert_eq!(dir.len(), 2);
        assert_eq!(dir.store().contents().as_deref(), Some(""));

        let _ = dir.delete_user("Van Dyke", "Dick").unwrap();
        let _ = dir.add_user("Doe", "Jane", "111");
        assert_eq!(dir.store().contents().as_deref(), Some("Doe Jane 111\n"));
    }

    #[test]
    fn test_load_replaces_existing_contents() {
        let mut dir = Directory::new(
            MemoryStore::with_contents("Doe Jane 1\n"),
            DirectoryOptions::default(),
        );
        assert_eq!(dir.load_from_file(), 1);
        assert_eq!(dir.load_from_file(), 1);
        assert_eq!(dir.len(), 1);
    }
}
