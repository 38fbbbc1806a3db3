use actix_web::http::StatusCode;
use sample_core::domain::Micropost;
use sample_core::ports::BaseRepository;
use sample_shared::paths;

use crate::support::{PASSWORD, create_admin, create_user, open, test_state, user_count};

#[actix_web::test]
async fn signup_page() {
    let state = test_state();
    let mut browser = open(&state).await;

    browser.visit(&paths::signup_path()).await;

    assert!(browser.page.has_heading("Signup"));
    assert!(browser.page.has_title("Sample App | Signup"));
}

#[actix_web::test]
async fn users_new_is_the_signup_form() {
    let state = test_state();
    let mut browser = open(&state).await;

    browser.visit("/users/new").await;

    assert_eq!(browser.page.status, StatusCode::OK);
    assert!(browser.page.has_title("Signup"));
    assert!(browser.page.has_heading("Signup"));
    assert!(browser.page.has_button("Create my account"));
}

#[actix_web::test]
async fn empty_signup_does_not_create_a_user() {
    let state = test_state();
    let mut browser = open(&state).await;

    browser.visit(&paths::signup_path()).await;
    browser.click_button("Create my account").await;

    assert_eq!(user_count(&state).await, 0);
    assert_eq!(browser.page.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(browser.page.has_title("Signup"));
    assert!(browser.page.has_content("errors prohibited this user from being saved"));
    assert!(browser.page.has_content("Name can't be blank"));
    assert!(browser.page.has_content("Password can't be blank"));
}

#[actix_web::test]
async fn valid_signup_creates_and_signs_in_the_user() {
    let state = test_state();
    let mut browser = open(&state).await;

    browser.visit(&paths::signup_path()).await;
    browser.fill_in("Name", "Matt Elhotiby");
    browser.fill_in("Email", "matt@example.com");
    browser.fill_in("Password", "foobar");
    browser.fill_in("Confirmation", "foobar");
    browser.click_button("Create my account").await;

    assert_eq!(user_count(&state).await, 1);
    assert!(browser.page.has_title("Matt Elhotiby"));
    assert!(browser.page.has_heading("Matt Elhotiby"));
    assert!(browser.page.has_flash("success", "Welcome to the Sample App!"));
    assert!(browser.page.has_link("Sign out"));

    let user = state
        .users
        .find_by_email("matt@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(!user.admin);
}

#[actix_web::test]
async fn signup_rejects_taken_email_in_any_case() {
    let state = test_state();
    create_user(&state, "Example User", "user@example.com").await;
    let mut browser = open(&state).await;

    browser.visit(&paths::signup_path()).await;
    browser.fill_in("Name", "Copycat");
    browser.fill_in("Email", "USER@Example.com");
    browser.fill_in("Password", "foobar");
    browser.fill_in("Confirmation", "foobar");
    browser.click_button("Create my account").await;

    assert_eq!(user_count(&state).await, 1);
    assert!(browser.page.has_content("1 error prohibited this user from being saved"));
    assert!(browser.page.has_content("Email has already been taken"));
}

#[actix_web::test]
async fn signup_ignores_admin_field() {
    let state = test_state();
    let mut browser = open(&state).await;

    browser
        .submit(
            &paths::users_path(),
            &[
                ("user[name]", "Sneaky"),
                ("user[email]", "sneaky@example.com"),
                ("user[password]", "foobar"),
                ("user[password_confirmation]", "foobar"),
                ("user[admin]", "1"),
            ],
        )
        .await;

    let user = state
        .users
        .find_by_email("sneaky@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(!user.admin);
}

#[actix_web::test]
async fn index_lists_users_with_pagination() {
    let state = test_state();
    let user = create_user(&state, "Example User", "user@example.com").await;
    for i in 0..30 {
        create_user(&state, &format!("Person {i}"), &format!("person-{i}@example.com")).await;
    }
    let mut browser = open(&state).await;
    browser.sign_in(&user.email, PASSWORD).await;

    browser.visit(&paths::users_path()).await;

    assert!(browser.page.has_title("All users"));
    assert!(browser.page.has_heading("All users"));
    assert!(browser.page.has_link_to("Next", "/users?page=2"));
    assert!(browser.page.has_link_to("2", "/users?page=2"));
    assert!(browser.page.has_link("Example User"));
    assert!(browser.page.has_link("Person 28"));
    assert!(!browser.page.has_link("Person 29"));
    assert!(!browser.page.has_link("delete"));

    browser.click_link("Next").await;

    assert!(browser.page.has_link("Person 29"));
    assert!(browser.page.has_link_to("Previous", "/users?page=1"));
    assert!(!browser.page.has_link("delete"));
}

#[actix_web::test]
async fn index_without_enough_users_has_no_pagination() {
    let state = test_state();
    let user = create_user(&state, "Example User", "user@example.com").await;
    for i in 0..29 {
        create_user(&state, &format!("Person {i}"), &format!("person-{i}@example.com")).await;
    }
    let mut browser = open(&state).await;
    browser.sign_in(&user.email, PASSWORD).await;

    browser.visit(&paths::users_path()).await;

    assert!(!browser.page.has_link("Next"));
    assert!(!browser.page.has_link("2"));
}

#[actix_web::test]
async fn index_past_the_last_page_is_empty() {
    let state = test_state();
    let user = create_user(&state, "Example User", "user@example.com").await;
    for i in 0..30 {
        create_user(&state, &format!("Person {i}"), &format!("person-{i}@example.com")).await;
    }
    let mut browser = open(&state).await;
    browser.sign_in(&user.email, PASSWORD).await;

    browser.visit("/users?page=18446744073709551615").await;

    assert_eq!(browser.page.status, StatusCode::OK);
    assert!(browser.page.has_heading("All users"));
    assert!(!browser.page.has_link("Example User"));
    assert!(!browser.page.has_link("Person 0"));
    assert!(browser.page.has_link_to("Previous", "/users?page=2"));

    browser.visit("/?page=18446744073709551615").await;

    assert_eq!(browser.page.status, StatusCode::OK);
    assert!(browser.page.has_content("Nothing in your feed yet."));
}

#[actix_web::test]
async fn admins_delete_other_users() {
    let state = test_state();
    let admin = create_admin(&state, "Admin", "admin@example.com").await;
    let other = create_user(&state, "Other User", "other@example.com").await;
    let mut browser = open(&state).await;
    browser.sign_in(&admin.email, PASSWORD).await;

    browser.visit(&paths::users_path()).await;

    assert!(browser.page.has_link_to("delete", &paths::user_path(other.id)));
    assert!(!browser.page.has_link_to("delete", &paths::user_path(admin.id)));

    browser.click_link("delete").await;

    assert_eq!(user_count(&state).await, 1);
    assert_eq!(browser.page.path, paths::users_path());
    assert!(browser.page.has_flash("success", "User destroyed."));
    assert!(!browser.page.has_link("Other User"));
}

#[actix_web::test]
async fn profile_shows_microposts() {
    let state = test_state();
    let user = create_user(&state, "Example User", "user@example.com").await;
    for content in ["Foo", "Bar"] {
        state
            .microposts
            .save(Micropost::new(user.id, content).unwrap())
            .await
            .unwrap();
    }
    let mut browser = open(&state).await;

    browser.visit(&paths::user_path(user.id)).await;

    assert!(browser.page.has_heading("Example User"));
    assert!(browser.page.has_title("Example User"));
    assert!(browser.page.has_content("Foo"));
    assert!(browser.page.has_content("Bar"));
    assert!(browser.page.has_content("Microposts (2)"));
    // Only the author gets delete links.
    assert!(!browser.page.has_link("delete"));
}

#[actix_web::test]
async fn edit_page() {
    let state = test_state();
    let user = create_user(&state, "Example User", "user@example.com").await;
    let mut browser = open(&state).await;
    browser.sign_in(&user.email, PASSWORD).await;

    browser.click_link("Settings").await;

    assert!(browser.page.has_heading("Update your profile"));
    assert!(browser.page.has_title("Edit user"));
    assert!(browser.page.has_button("Save changes"));
}

#[actix_web::test]
async fn invalid_edit_does_not_persist() {
    let state = test_state();
    let user = create_user(&state, "Example User", "user@example.com").await;
    let mut browser = open(&state).await;
    browser.sign_in(&user.email, PASSWORD).await;

    browser.visit(&paths::edit_user_path(user.id)).await;
    browser.fill_in("Name", "");
    browser.fill_in("Email", "not-an-email");
    browser.click_button("Save changes").await;

    assert_eq!(browser.page.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(browser.page.has_content("error"));
    assert!(browser.page.has_content("Email is invalid"));

    let reloaded = state.users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.name, "Example User");
    assert_eq!(reloaded.email, "user@example.com");
}

#[actix_web::test]
async fn valid_edit_persists() {
    let state = test_state();
    let user = create_user(&state, "Example User", "user@example.com").await;
    let mut browser = open(&state).await;
    browser.sign_in(&user.email, PASSWORD).await;

    browser.visit(&paths::edit_user_path(user.id)).await;
    browser.fill_in("Name", "New Name");
    browser.fill_in("Email", "New@Example.com");
    browser.fill_in("Password", "barbaz");
    browser.fill_in("Confirmation", "barbaz");
    browser.click_button("Save changes").await;

    assert!(browser.page.has_title("New Name"));
    assert!(browser.page.has_flash("success", "Profile updated"));
    assert!(browser.page.has_link("Sign out"));

    let reloaded = state.users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.name, "New Name");
    assert_eq!(reloaded.email, "new@example.com");

    browser.click_link("Sign out").await;
    browser.sign_in("new@example.com", "barbaz").await;
    assert_eq!(browser.page.path, paths::user_path(user.id));
}

#[actix_web::test]
async fn blank_password_keeps_the_current_one() {
    let state = test_state();
    let user = create_user(&state, "Example User", "user@example.com").await;
    let mut browser = open(&state).await;
    browser.sign_in(&user.email, PASSWORD).await;

    browser.visit(&paths::edit_user_path(user.id)).await;
    browser.fill_in("Name", "Renamed");
    browser.click_button("Save changes").await;
    assert!(browser.page.has_flash("success", "Profile updated"));

    browser.click_link("Sign out").await;
    browser.sign_in(&user.email, PASSWORD).await;
    assert_eq!(browser.page.path, paths::user_path(user.id));
    assert!(browser.page.has_heading("Renamed"));
}

#[actix_web::test]
async fn deleted_users_are_signed_out() {
    let state = test_state();
    let user = create_user(&state, "Example User", "user@example.com").await;
    let mut browser = open(&state).await;
    browser.sign_in(&user.email, PASSWORD).await;

    state.users.delete(user.id).await.unwrap();
    browser.visit(&paths::root_path()).await;

    assert!(browser.page.has_link("Sign in"));
    assert!(browser.page.has_link_to("Sign up now!", &paths::signup_path()));
}
