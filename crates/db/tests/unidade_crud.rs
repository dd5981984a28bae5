//! Repository-level tests for the `unidades` table.

use intake_db::models::unidade::{CreateUnidade, UpdateUnidade};
use intake_db::repositories::{UnidadeRepo, UniqueField};
use sqlx::PgPool;

fn nova_unidade(nome: &str, sigla: &str, codigo: &str) -> CreateUnidade {
    CreateUnidade {
        nome: nome.to_string(),
        sigla: sigla.to_string(),
        codigo: codigo.to_string(),
        status: 1,
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_and_point_lookups(pool: PgPool) {
    let created = UnidadeRepo::create(&pool, &nova_unidade("Vara Civel", "VC", "001"))
        .await
        .unwrap();
    assert_eq!(created.nome, "Vara Civel");
    assert_eq!(created.status, 1);

    let by_id = UnidadeRepo::find_by_id(&pool, created.id).await.unwrap();
    assert_eq!(by_id.unwrap().sigla, "VC");

    for (field, value) in [
        (UniqueField::Nome, "Vara Civel"),
        (UniqueField::Sigla, "VC"),
        (UniqueField::Codigo, "001"),
    ] {
        let found = UnidadeRepo::find_by_unique_field(&pool, field, value)
            .await
            .unwrap();
        assert_eq!(found.unwrap().id, created.id);
    }

    let missing = UnidadeRepo::find_by_unique_field(&pool, UniqueField::Codigo, "999")
        .await
        .unwrap();
    assert!(missing.is_none());
}

/// The lookup is an exact match, not a substring match.
#[sqlx::test(migrations = "../../migrations")]
async fn test_unique_field_lookup_is_exact(pool: PgPool) {
    UnidadeRepo::create(&pool, &nova_unidade("Vara Civel", "VC", "001"))
        .await
        .unwrap();

    let partial = UnidadeRepo::find_by_unique_field(&pool, UniqueField::Nome, "Vara")
        .await
        .unwrap();
    assert!(partial.is_none());
}

/// Duplicate identifiers are rejected by the unique indexes even when
/// no application-level guard runs first.
#[sqlx::test(migrations = "../../migrations")]
async fn test_unique_indexes_reject_duplicates(pool: PgPool) {
    UnidadeRepo::create(&pool, &nova_unidade("Vara Civel", "VC", "001"))
        .await
        .unwrap();

    let duplicate = UnidadeRepo::create(&pool, &nova_unidade("Outra Vara", "VC", "002")).await;
    let err = duplicate.expect_err("duplicate sigla must violate uq_unidades_sigla");
    let db_err = err.as_database_error().expect("must be a database error");
    assert!(db_err.is_unique_violation());
    assert_eq!(db_err.constraint(), Some("uq_unidades_sigla"));
}

/// COALESCE patch: only non-None fields change, `updated_at` advances.
#[sqlx::test(migrations = "../../migrations")]
async fn test_update_is_partial(pool: PgPool) {
    let created = UnidadeRepo::create(&pool, &nova_unidade("Vara Civel", "VC", "001"))
        .await
        .unwrap();

    let patch = UpdateUnidade {
        sigla: Some("VCV".to_string()),
        ..Default::default()
    };
    let updated = UnidadeRepo::update(&pool, created.id, &patch)
        .await
        .unwrap()
        .expect("row exists");

    assert_eq!(updated.sigla, "VCV");
    assert_eq!(updated.nome, "Vara Civel");
    assert_eq!(updated.codigo, "001");
    assert_eq!(updated.status, 1);
    assert!(updated.updated_at >= created.updated_at);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_missing_row_returns_none(pool: PgPool) {
    let patch = UpdateUnidade {
        nome: Some("Anything".to_string()),
        ..Default::default()
    };
    let updated = UnidadeRepo::update(&pool, 9999, &patch).await.unwrap();
    assert!(updated.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_all_orders_by_nome(pool: PgPool) {
    UnidadeRepo::create(&pool, &nova_unidade("Zeta", "ZZ", "003"))
        .await
        .unwrap();
    UnidadeRepo::create(&pool, &nova_unidade("Alfa", "AA", "001"))
        .await
        .unwrap();
    UnidadeRepo::create(&pool, &nova_unidade("Bravo", "BB", "002"))
        .await
        .unwrap();

    let all = UnidadeRepo::list_all(&pool).await.unwrap();
    let nomes: Vec<&str> = all.iter().map(|u| u.nome.as_str()).collect();
    assert_eq!(nomes, vec!["Alfa", "Bravo", "Zeta"]);
}

/// `count_search` and `search` apply the same filter, so the total
/// always agrees with the page contents.
#[sqlx::test(migrations = "../../migrations")]
async fn test_count_and_page_agree(pool: PgPool) {
    UnidadeRepo::create(&pool, &nova_unidade("Vara Civel", "VC", "001"))
        .await
        .unwrap();
    UnidadeRepo::create(&pool, &nova_unidade("Vara Criminal", "VCR", "002"))
        .await
        .unwrap();
    UnidadeRepo::create(&pool, &nova_unidade("Ouvidoria", "OUV", "003"))
        .await
        .unwrap();

    let total = UnidadeRepo::count_search(&pool, Some("Vara"), None)
        .await
        .unwrap();
    let page = UnidadeRepo::search(&pool, Some("Vara"), None, 100, 0)
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(page.len(), 2);

    // Substring match also reaches sigla and codigo.
    let by_sigla = UnidadeRepo::count_search(&pool, Some("OUV"), None)
        .await
        .unwrap();
    assert_eq!(by_sigla, 1);
    let by_codigo = UnidadeRepo::count_search(&pool, Some("003"), None)
        .await
        .unwrap();
    assert_eq!(by_codigo, 1);
}

/// `%` and `_` in `busca` are literals, not LIKE wildcards.
#[sqlx::test(migrations = "../../migrations")]
async fn test_search_treats_wildcards_as_literals(pool: PgPool) {
    UnidadeRepo::create(&pool, &nova_unidade("Vara Civel", "VC", "001"))
        .await
        .unwrap();
    UnidadeRepo::create(&pool, &nova_unidade("Meta 10%", "M10", "002"))
        .await
        .unwrap();
    UnidadeRepo::create(&pool, &nova_unidade("Setor_Interno", "SI", "003"))
        .await
        .unwrap();

    // A bare underscore matches only the row containing one, not every row.
    let underscore = UnidadeRepo::count_search(&pool, Some("_"), None)
        .await
        .unwrap();
    assert_eq!(underscore, 1);
    let rows = UnidadeRepo::search(&pool, Some("_"), None, 100, 0)
        .await
        .unwrap();
    assert_eq!(rows[0].nome, "Setor_Interno");

    // "10%" must not match "001"/"002"/"003" via a trailing wildcard.
    let percent = UnidadeRepo::count_search(&pool, Some("10%"), None)
        .await
        .unwrap();
    assert_eq!(percent, 1);
    let rows = UnidadeRepo::search(&pool, Some("10%"), None, 100, 0)
        .await
        .unwrap();
    assert_eq!(rows[0].nome, "Meta 10%");

    // No match at all for a wildcard-only query against plain rows.
    sqlx::query("DELETE FROM unidades WHERE nome <> 'Vara Civel'")
        .execute(&pool)
        .await
        .unwrap();
    let none = UnidadeRepo::count_search(&pool, Some("%"), None)
        .await
        .unwrap();
    assert_eq!(none, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_search_status_filter(pool: PgPool) {
    let ativa = UnidadeRepo::create(&pool, &nova_unidade("Vara Civel", "VC", "001"))
        .await
        .unwrap();
    UnidadeRepo::create(&pool, &nova_unidade("Vara Criminal", "VCR", "002"))
        .await
        .unwrap();

    let patch = UpdateUnidade {
        status: Some(0),
        ..Default::default()
    };
    UnidadeRepo::update(&pool, ativa.id, &patch).await.unwrap();

    let inativas = UnidadeRepo::search(&pool, None, Some(0), 100, 0).await.unwrap();
    assert_eq!(inativas.len(), 1);
    assert_eq!(inativas[0].nome, "Vara Civel");

    let todas = UnidadeRepo::count_search(&pool, None, None).await.unwrap();
    assert_eq!(todas, 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_search_pages_deterministically(pool: PgPool) {
    for (nome, sigla, codigo) in [
        ("Charlie", "CC", "003"),
        ("Alfa", "AA", "001"),
        ("Bravo", "BB", "002"),
    ] {
        UnidadeRepo::create(&pool, &nova_unidade(nome, sigla, codigo))
            .await
            .unwrap();
    }

    let first = UnidadeRepo::search(&pool, None, None, 2, 0).await.unwrap();
    let second = UnidadeRepo::search(&pool, None, None, 2, 2).await.unwrap();
    assert_eq!(first[0].nome, "Alfa");
    assert_eq!(first[1].nome, "Bravo");
    assert_eq!(second[0].nome, "Charlie");
}
