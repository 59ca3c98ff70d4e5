use anyhow::Result;
use httpmock::prelude::*;
use rocket_cart::core::PersistenceStore;
use rocket_cart::{
    ApiCatalog, Cart, CartStore, ErrorKind, LocalStorage, TomlConfig, TracingNotifier,
    UpdateProductAmount, DEFAULT_STORAGE_KEY,
};
use tempfile::TempDir;

fn mock_product(server: &MockServer, id: u64, title: &str, price: f64, stock: u32) {
    server.mock(|when, then| {
        when.method(GET).path(format!("/products/{}", id));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "id": id,
                "title": title,
                "price": price,
                "image": format!("https://rocketseat-cdn.s3.example.com/{}.jpg", id)
            }));
    });
    server.mock(|when, then| {
        when.method(GET).path(format!("/stock/{}", id));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"id": id, "amount": stock}));
    });
}

async fn open_store(
    server: &MockServer,
    storage_path: &str,
) -> Result<CartStore<ApiCatalog, LocalStorage, TracingNotifier>> {
    let catalog = ApiCatalog::new(&server.base_url(), 5)?;
    let storage = LocalStorage::new(storage_path.to_string());
    Ok(CartStore::load(catalog, storage, TracingNotifier, DEFAULT_STORAGE_KEY).await?)
}

#[tokio::test]
async fn test_end_to_end_cart_session() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    mock_product(&server, 1, "Tênis de Caminhada Leve Confortável", 179.9, 3);
    mock_product(&server, 2, "Tênis VR Caminhada Confortável Detalhes Couro Masculino", 139.9, 2);

    let store = open_store(&server, &storage_path).await?;
    store.add_product(1).await?;
    store.add_product(2).await?;
    store.add_product(1).await?;
    store
        .update_product_amount(UpdateProductAmount {
            product_id: 2,
            amount: 2,
        })
        .await?;
    let cart = store.remove_product(1).await?;

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.line(2).unwrap().amount, 2);

    let raw = LocalStorage::new(storage_path.clone())
        .get_item(DEFAULT_STORAGE_KEY)
        .await?
        .expect("cart should be persisted");
    let persisted: Cart = serde_json::from_str(&raw)?;
    assert_eq!(persisted, cart);

    let json: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(json[0]["id"], 2);
    assert_eq!(json[0]["amount"], 2);
    assert_eq!(
        json[0]["title"],
        "Tênis VR Caminhada Confortável Detalhes Couro Masculino"
    );

    Ok(())
}

#[tokio::test]
async fn test_cart_survives_restart() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    mock_product(&server, 4, "Tênis Adidas Duramo Lite 2.0", 219.9, 10);

    {
        let store = open_store(&server, &storage_path).await?;
        store.add_product(4).await?;
        store.add_product(4).await?;
    }

    let reopened = open_store(&server, &storage_path).await?;
    let cart = reopened.cart().await;

    assert_eq!(cart.line(4).unwrap().amount, 2);
    assert!((cart.subtotal() - 439.8).abs() < 1e-9);

    Ok(())
}

#[tokio::test]
async fn test_catalog_failures_leave_cart_untouched() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/products/9");
        then.status(404).json_body(serde_json::json!({}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/stock/9");
        then.status(404).json_body(serde_json::json!({}));
    });
    let broken_stock = server.mock(|when, then| {
        when.method(GET).path("/stock/10");
        then.status(503);
    });

    let store = open_store(&server, &storage_path).await?;

    let err = store.add_product(9).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CatalogLookup);

    let err = store
        .update_product_amount(UpdateProductAmount {
            product_id: 10,
            amount: 1,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CatalogLookup);
    broken_stock.assert();

    assert!(store.cart().await.is_empty());
    let stored = LocalStorage::new(storage_path)
        .get_item(DEFAULT_STORAGE_KEY)
        .await?;
    assert!(stored.is_none());

    Ok(())
}

#[tokio::test]
async fn test_unreachable_catalog_is_catalog_lookup_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let catalog = ApiCatalog::new("http://127.0.0.1:9", 1)?;
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let store = CartStore::load(catalog, storage, TracingNotifier, DEFAULT_STORAGE_KEY).await?;

    let err = store.add_product(1).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CatalogLookup);
    Ok(())
}

#[tokio::test]
async fn test_store_from_toml_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage_path = temp_dir.path().join("carts");
    let normalized_path = storage_path.to_str().unwrap().replace('\\', "/");

    let server = MockServer::start();
    mock_product(&server, 3, "Tênis Adidas Duramo Lite 2.0", 219.9, 1);

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[catalog]
endpoint = "{}"
timeout_seconds = 2

[storage]
path = "{}"
key = "shop:cart"
"#,
        server.base_url(),
        normalized_path
    ))?;

    let catalog = ApiCatalog::from_config(&config)?;
    let storage = LocalStorage::new(config.storage.path.clone());
    let store = CartStore::load(catalog, storage.clone(), TracingNotifier, config.storage.key.as_str()).await?;

    store.add_product(3).await?;

    assert!(storage.file_path("shop:cart").exists());
    assert_eq!(store.storage_key(), "shop:cart");
    Ok(())
}
