use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_themes_books_and_durations(ctx: &TestContext) {
    let response = ctx.client.get("/api/catalog").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    let themes = body.get("themes").and_then(|v| v.as_array()).unwrap();
    let books = body.get("books").and_then(|v| v.as_array()).unwrap();
    let durations = body.get("durations").and_then(|v| v.as_array()).unwrap();

    assert_eq!(themes.len(), 10);
    assert_eq!(books.len(), 20);
    assert_eq!(durations.len(), 3);
    assert!(themes.iter().any(|t| t.as_str() == Some("Fantasy & Magic")));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_word_budgets(ctx: &TestContext) {
    let response = ctx.client.get("/api/catalog").await.unwrap();
    let body = response.body.as_ref().unwrap();

    let standard = body
        .get("durations")
        .and_then(|v| v.as_array())
        .unwrap()
        .iter()
        .find(|d| d.get("duration").and_then(|v| v.as_str()) == Some("Standard"))
        .expect("Standard duration missing");

    let words = standard.get("words").unwrap();
    assert_eq!(words.get("target").and_then(|v| v.as_u64()), Some(600));
    assert_eq!(words.get("min").and_then(|v| v.as_u64()), Some(500));
    assert_eq!(words.get("max").and_then(|v| v.as_u64()), Some(700));
}
