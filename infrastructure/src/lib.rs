// Module declarations
pub mod persistence;

use application::DocumentStore;
use std::sync::Arc;

// Re-export implementations
pub use persistence::InMemoryDocumentRepository;

/// A fresh, empty [`DocumentStore`] backed by the in-memory table.
pub fn in_memory_store() -> DocumentStore {
    DocumentStore::new(Arc::new(InMemoryDocumentRepository::new()))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{doc, init_tracing, ts};
    use domain::SearchRequest;
    use std::collections::HashSet;

    fn titles(docs: &[domain::Document]) -> HashSet<String> {
        docs.iter().map(|d| d.title.clone()).collect()
    }

    #[test]
    fn save_without_id_twice_creates_two_entries() {
        init_tracing();
        let store = in_memory_store();

        let first = store.save(doc("Same", "a1", ts(2024, 1, 1))).unwrap();
        let second = store.save(doc("Same", "a1", ts(2024, 1, 1))).unwrap();

        assert!(first.id().is_some());
        assert!(second.id().is_some());
        assert_ne!(first.id(), second.id());
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn save_with_existing_id_overwrites_in_place() {
        init_tracing();
        let store = in_memory_store();

        let saved = store.save(doc("Draft", "a1", ts(2024, 1, 1))).unwrap();
        let id = saved.id().cloned().unwrap();

        let mut edited = saved.clone();
        edited.title = "Final".to_string();
        edited.content = "rewritten".to_string();
        let resaved = store.save(edited).unwrap();

        assert_eq!(resaved.id(), Some(&id));
        assert_eq!(store.count().unwrap(), 1);
        let found = store.find_by_id(id.as_str()).unwrap().unwrap();
        assert_eq!(found.title, "Final");
        assert_eq!(found.content, "rewritten");
        assert_eq!(found.created, ts(2024, 1, 1));
    }

    #[test]
    fn save_keeps_caller_supplied_id_and_created() {
        let store = in_memory_store();
        let input = doc("Pinned", "a1", ts(2023, 7, 15)).with_id("pinned-id".into());

        let saved = store.save(input).unwrap();

        assert_eq!(saved.id().unwrap().as_str(), "pinned-id");
        assert_eq!(saved.created, ts(2023, 7, 15));
    }

    #[test]
    fn find_by_id_round_trips_saved_document() {
        let store = in_memory_store();
        let saved = store.save(doc("Alpha", "a1", ts(2024, 1, 1))).unwrap();

        let found = store
            .find_by_id(saved.id().unwrap().as_str())
            .unwrap()
            .expect("saved document is retrievable");

        assert_eq!(found, saved);
    }

    #[test]
    fn find_by_id_unknown_is_absent() {
        let store = in_memory_store();
        assert!(store.find_by_id("never-used").unwrap().is_none());
    }

    #[test]
    fn empty_request_returns_everything() {
        init_tracing();
        let store = in_memory_store();
        for title in ["Alpha", "Beta", "Gamma"] {
            store.save(doc(title, "a1", ts(2024, 1, 1))).unwrap();
        }

        let hits = store.search(&SearchRequest::new()).unwrap();

        assert_eq!(hits.len(), 3);
        assert_eq!(
            titles(&hits),
            HashSet::from(["Alpha".into(), "Beta".into(), "Gamma".into()])
        );
    }

    #[test]
    fn search_on_empty_store_is_empty() {
        let store = in_memory_store();
        assert!(store.search(&SearchRequest::new()).unwrap().is_empty());
    }

    #[test]
    fn title_prefixes_use_or_semantics() {
        let store = in_memory_store();
        for title in ["Alpha", "Beta", "Gamma"] {
            store.save(doc(title, "a1", ts(2024, 1, 1))).unwrap();
        }

        let request = SearchRequest::new().with_title_prefixes(["Al", "Ga"]);
        let hits = store.search(&request).unwrap();

        assert_eq!(
            titles(&hits),
            HashSet::from(["Alpha".into(), "Gamma".into()])
        );
    }

    #[test]
    fn fields_combine_with_and() {
        let store = in_memory_store();
        let doc1 = store.save(doc("Report", "a1", ts(2024, 1, 1))).unwrap();
        store.save(doc("Report", "a2", ts(2024, 6, 1))).unwrap();

        let request = SearchRequest::new()
            .with_title_prefixes(["Rep"])
            .with_author_ids(["a1"]);
        let hits = store.search(&request).unwrap();

        assert_eq!(hits, vec![doc1]);
    }

    #[test]
    fn author_ids_use_or_semantics() {
        init_tracing();
        let store = in_memory_store();
        store.save(doc("First", "a1", ts(2024, 1, 1))).unwrap();
        store.save(doc("Second", "a2", ts(2024, 1, 1))).unwrap();
        store.save(doc("Third", "a3", ts(2024, 1, 1))).unwrap();

        let request = SearchRequest::new().with_author_ids(["a1", "a2"]);
        let hits = store.search(&request).unwrap();

        assert_eq!(
            titles(&hits),
            HashSet::from(["First".into(), "Second".into()])
        );

        let narrowed = request.with_contains_contents(["Second body"]);
        assert_eq!(
            titles(&store.search(&narrowed).unwrap()),
            HashSet::from(["Second".into()])
        );
    }

    #[test]
    fn count_tracks_saves_and_deletes() {
        let store = in_memory_store();
        assert_eq!(store.count().unwrap(), 0);

        let saved = store.save(doc("Alpha", "a1", ts(2024, 1, 1))).unwrap();
        assert_eq!(store.count().unwrap(), 1);

        store.delete(saved.id().unwrap().as_str()).unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn created_range_is_inclusive_on_both_ends() {
        let store = in_memory_store();
        store.save(doc("Early", "a1", ts(2024, 1, 1))).unwrap();
        store.save(doc("Middle", "a1", ts(2024, 3, 1))).unwrap();
        store.save(doc("Late", "a1", ts(2024, 6, 1))).unwrap();
        store.save(doc("Later", "a1", ts(2024, 9, 1))).unwrap();

        let request = SearchRequest::new()
            .created_from(ts(2024, 1, 1))
            .created_to(ts(2024, 6, 1));
        let hits = store.search(&request).unwrap();

        assert_eq!(
            titles(&hits),
            HashSet::from(["Early".into(), "Middle".into(), "Late".into()])
        );
    }

    #[test]
    fn search_does_not_mutate_store() {
        let store = in_memory_store();
        let saved = store.save(doc("Alpha", "a1", ts(2024, 1, 1))).unwrap();

        let request = SearchRequest::new().with_contains_contents(["body"]);
        assert_eq!(store.search(&request).unwrap().len(), 1);
        assert_eq!(store.search(&request).unwrap().len(), 1);

        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(
            store.find_by_id(saved.id().unwrap().as_str()).unwrap(),
            Some(saved)
        );
    }

    #[test]
    fn save_all_assigns_ids_and_delete_removes() {
        let store = in_memory_store();
        let saved = store
            .save_all(vec![
                doc("One", "a1", ts(2024, 1, 1)),
                doc("Two", "a2", ts(2024, 1, 2)),
            ])
            .unwrap();

        assert_eq!(saved.len(), 2);
        assert!(saved.iter().all(|d| d.id().is_some()));
        assert_eq!(store.count().unwrap(), 2);

        let id = saved[0].id().unwrap().as_str();
        assert!(store.delete(id).unwrap());
        assert!(!store.delete(id).unwrap());
        assert!(store.find_by_id(id).unwrap().is_none());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn save_all_with_empty_batch_is_noop() {
        let store = in_memory_store();
        assert!(store.save_all(Vec::new()).unwrap().is_empty());
        assert_eq!(store.count().unwrap(), 0);
    }
}
