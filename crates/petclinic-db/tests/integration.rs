//! `PostgreSQL` backend tests.
//!
//! These need a live database reachable through `DATABASE_URL` and are
//! ignored by default. Run with `cargo test -p petclinic-db -- --ignored`.
//! Every test works on freshly generated ids, so runs do not interfere.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use chrono::NaiveDate;
use petclinic_db::{
    OwnerDocument, OwnerRepository, PetDocument, PetRepository, PgDocumentStore, PostgresConfig,
    PostgresPool, VetRepository, VisitDocument, VisitRepository,
};
use petclinic_types::{OwnerId, PetId, Vet, VisitId};

async fn store() -> PgDocumentStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PostgresPool::connect(&PostgresConfig::new(&url)).await.unwrap();
    pool.run_migrations().await.unwrap();
    PgDocumentStore::new(&pool)
}

fn owner(last_name: &str) -> OwnerDocument {
    OwnerDocument {
        id: OwnerId::new(),
        first_name: String::from("Dominik"),
        last_name: last_name.to_owned(),
        address: String::from("Address"),
        city: String::from("Bielefeld"),
        telephone: String::from("1233232"),
    }
}

fn pet(owner_id: OwnerId) -> PetDocument {
    PetDocument {
        id: PetId::new(),
        name: String::from("Rufus"),
        birth_date: NaiveDate::from_ymd_opt(2015, 12, 1).unwrap(),
        pet_type: String::from("Dog"),
        owner_id,
    }
}

#[tokio::test]
#[ignore = "requires live PostgreSQL"]
async fn owner_upsert_replaces_document() {
    let store = store().await;
    let mut doc = owner("Picker");
    OwnerRepository::save(&store, doc.clone()).await.unwrap();

    doc.city = String::from("Hamburg");
    OwnerRepository::save(&store, doc.clone()).await.unwrap();

    let loaded = OwnerRepository::find_by_id(&store, doc.id).await.unwrap().unwrap();
    assert_eq!(loaded, doc);
}

#[tokio::test]
#[ignore = "requires live PostgreSQL"]
async fn last_name_search_is_case_insensitive_substring() {
    let store = store().await;
    let marker = format!("Zq{}", OwnerId::new().into_inner().simple());
    let doc = owner(&format!("{marker}Picker"));
    OwnerRepository::save(&store, doc.clone()).await.unwrap();

    let hits = store
        .find_by_last_name_containing(&marker.to_uppercase())
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, doc.id);

    // LIKE wildcards in the fragment are matched literally.
    assert!(
        store
            .find_by_last_name_containing(&format!("{marker}%"))
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
#[ignore = "requires live PostgreSQL"]
async fn pets_are_scoped_by_owner_and_keep_insertion_order() {
    let store = store().await;
    let owner_id = OwnerId::new();
    let first = pet(owner_id);
    let second = pet(owner_id);
    PetRepository::save(&store, first.clone()).await.unwrap();
    PetRepository::save(&store, second.clone()).await.unwrap();
    PetRepository::save(&store, first.clone()).await.unwrap();

    let pets = store.find_by_owner_id(owner_id).await.unwrap();
    let ids: Vec<_> = pets.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    assert!(
        store
            .find_by_id_and_owner_id(first.id, OwnerId::new())
            .await
            .unwrap()
            .is_none()
    );

    assert!(store.delete(first.id).await.unwrap());
    assert!(!store.delete(first.id).await.unwrap());
}

#[tokio::test]
#[ignore = "requires live PostgreSQL"]
async fn visits_filter_by_pet() {
    let store = store().await;
    let pet_id = PetId::new();
    let visit = VisitDocument {
        id: VisitId::new(),
        date: NaiveDate::from_ymd_opt(2021, 3, 4).unwrap(),
        description: String::from("Doctor visit"),
        pet_id,
    };
    VisitRepository::save(&store, visit.clone()).await.unwrap();

    assert_eq!(store.find_by_pet_id(pet_id).await.unwrap(), vec![visit.clone()]);
    assert!(store.find_by_pet_id(PetId::new()).await.unwrap().is_empty());
    assert_eq!(
        VisitRepository::find_by_id(&store, visit.id).await.unwrap(),
        Some(visit)
    );
}

#[tokio::test]
#[ignore = "requires live PostgreSQL"]
async fn vet_count_grows_with_saves() {
    let store = store().await;
    let before = VetRepository::count(&store).await.unwrap();
    VetRepository::save(&store, Vet::new("Helen", "Leary", vec![String::from("Radiology")]))
        .await
        .unwrap();
    assert_eq!(VetRepository::count(&store).await.unwrap(), before + 1);
}
