use actix_web::http::StatusCode;
use sample_shared::paths;

use crate::support::{open, test_state};

#[actix_web::test]
async fn home_page_welcomes_visitors() {
    let state = test_state();
    let mut browser = open(&state).await;

    browser.visit(&paths::root_path()).await;

    assert!(browser.page.has_heading("Sample App"));
    assert!(browser.page.has_title("Sample App"));
    assert!(!browser.page.has_title("| Home"));
    assert!(browser.page.has_link_to("Sign up now!", &paths::signup_path()));
}

#[actix_web::test]
async fn home_alias_serves_the_home_page() {
    let state = test_state();
    let mut browser = open(&state).await;

    browser.visit("/home").await;

    assert_eq!(browser.page.status, StatusCode::OK);
    assert!(browser.page.has_heading("Sample App"));
}

#[actix_web::test]
async fn static_pages_have_headings_and_titles() {
    let state = test_state();
    let mut browser = open(&state).await;

    for (path, heading) in [
        (paths::help_path(), "Help"),
        (paths::about_path(), "About Us"),
        (paths::contact_path(), "Contact"),
    ] {
        browser.visit(&path).await;
        assert!(browser.page.has_heading(heading), "heading on {path}");
        assert!(
            browser.page.has_title(&format!("Sample App | {heading}")),
            "title on {path}"
        );
    }
}

#[actix_web::test]
async fn layout_links_reach_each_page() {
    let state = test_state();
    let mut browser = open(&state).await;
    browser.visit(&paths::root_path()).await;

    browser.click_link("About").await;
    assert!(browser.page.has_title("About Us"));
    browser.click_link("Help").await;
    assert!(browser.page.has_title("Help"));
    browser.click_link("Contact").await;
    assert!(browser.page.has_title("Contact"));
    browser.click_link("Home").await;
    browser.click_link("Sign up now!").await;
    assert!(browser.page.has_title("Signup"));
    browser.click_link("sample app").await;
    assert!(browser.page.has_heading("Sample App"));
}

#[actix_web::test]
async fn unknown_paths_render_not_found() {
    let state = test_state();
    let mut browser = open(&state).await;

    browser.visit("/no/such/page").await;

    assert_eq!(browser.page.status, StatusCode::NOT_FOUND);
    assert!(browser.page.has_heading("Page not found"));
}

#[actix_web::test]
async fn malformed_ids_are_not_found() {
    let state = test_state();
    let mut browser = open(&state).await;

    browser.visit("/users/not-a-uuid").await;

    assert_eq!(browser.page.status, StatusCode::NOT_FOUND);
    assert!(browser.page.has_heading("Not Found"));
    assert!(browser.page.has_content("No route matches /users/not-a-uuid"));
}
