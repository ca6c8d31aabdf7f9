//! Integration tests for image set replacement.

use dungeon_core::catalog::CatalogKind;
use dungeon_core::lifecycle::ItemStatus;
use dungeon_core::ownership::Privacy;
use dungeon_core::roles::UserRole;
use dungeon_core::types::DbId;
use dungeon_db::models::character::CreateCharacter;
use dungeon_db::models::image::ImageTarget;
use dungeon_db::models::user::CreateUser;
use dungeon_db::repositories::{CatalogRepo, CharacterRepo, ImageRepo, UserRepo};
use sqlx::PgPool;

async fn seed_character(pool: &PgPool) -> DbId {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: "painter".to_string(),
            email: "painter@example.com".to_string(),
            password_hash: "x".to_string(),
            role: UserRole::User,
        },
    )
    .await
    .unwrap();
    let class = CatalogRepo::list(pool, CatalogKind::Class).await.unwrap()[0].id;
    let race = CatalogRepo::list(pool, CatalogKind::Race).await.unwrap()[0].id;
    CharacterRepo::create(
        pool,
        &CreateCharacter {
            user_id: user.id,
            title: "Model".to_string(),
            description: String::new(),
            class_id: class,
            race_id: race,
            privacy: Privacy::Public,
        },
    )
    .await
    .unwrap()
    .id
}

fn paths(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| format!("storage/images/{n}")).collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replace_swaps_whole_set(pool: PgPool) {
    let id = seed_character(&pool).await;

    let old = ImageRepo::replace(&pool, ImageTarget::Character, id, &paths(&["a", "b"]))
        .await
        .unwrap()
        .expect("active owner");
    assert!(old.is_empty());

    let old = ImageRepo::replace(&pool, ImageTarget::Character, id, &paths(&["c", "d", "e"]))
        .await
        .unwrap()
        .expect("active owner");
    assert_eq!(old.len(), 2);

    let rows = ImageRepo::list(&pool, ImageTarget::Character, id).await.unwrap();
    assert_eq!(rows.len(), 3);

    let character = CharacterRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(character.stored_image_paths(), paths(&["c", "d", "e"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replace_on_missing_owner_changes_nothing(pool: PgPool) {
    let result = ImageRepo::replace(
        &pool,
        ImageTarget::Quest,
        uuid::Uuid::new_v4(),
        &paths(&["a"]),
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn hard_delete_removes_image_rows(pool: PgPool) {
    let id = seed_character(&pool).await;
    ImageRepo::replace(&pool, ImageTarget::Character, id, &paths(&["a"]))
        .await
        .unwrap()
        .expect("active owner");

    assert!(CharacterRepo::hard_delete(&pool, id).await.unwrap());
    let rows = ImageRepo::list(&pool, ImageTarget::Character, id).await.unwrap();
    assert!(rows.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replace_skips_owner_archived_after_load(pool: PgPool) {
    let id = seed_character(&pool).await;
    ImageRepo::replace(&pool, ImageTarget::Character, id, &paths(&["a"]))
        .await
        .unwrap()
        .expect("active owner");

    // The caller has already checked the owner is active; a cascade lands now.
    let loaded = CharacterRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(loaded.status, ItemStatus::Active);
    CatalogRepo::delete_cascading(&pool, CatalogKind::Class, loaded.class_id)
        .await
        .unwrap();

    let result = ImageRepo::replace(&pool, ImageTarget::Character, id, &paths(&["b", "c"]))
        .await
        .unwrap();
    assert!(result.is_none());

    let character = CharacterRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(character.status, ItemStatus::Archived);
    assert_eq!(character.stored_image_paths(), paths(&["a"]));
    let rows = ImageRepo::list(&pool, ImageTarget::Character, id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].path, paths(&["a"])[0]);
}
