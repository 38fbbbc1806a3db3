use sample_core::ports::BaseRepository;
use sample_shared::paths;

use crate::support::{PASSWORD, create_admin, create_user, open, test_state, user_count};

#[actix_web::test]
async fn signin_page() {
    let state = test_state();
    let mut browser = open(&state).await;

    browser.visit(&paths::signin_path()).await;

    assert!(browser.page.has_heading("Sign in"));
    assert!(browser.page.has_title("Sign in"));
}

#[actix_web::test]
async fn invalid_signin_flashes_error_until_next_page() {
    let state = test_state();
    let mut browser = open(&state).await;

    browser.visit(&paths::signin_path()).await;
    browser.click_button("Sign in").await;

    assert!(browser.page.has_title("Sign in"));
    assert!(browser.page.has_flash("error", "Invalid"));

    browser.click_link("Home").await;
    assert!(!browser.page.has_flash("error", ""));
}

#[actix_web::test]
async fn wrong_password_is_rejected() {
    let state = test_state();
    let user = create_user(&state, "Example User", "user@example.com").await;
    let mut browser = open(&state).await;

    browser.sign_in(&user.email, "not-the-password").await;

    assert!(browser.page.has_flash("error", "Invalid email/password combination"));
    assert!(browser.page.has_link("Sign in"));
    assert!(!browser.page.has_link("Sign out"));
}

#[actix_web::test]
async fn valid_signin_then_signout() {
    let state = test_state();
    let user = create_user(&state, "Example User", "user@example.com").await;
    let mut browser = open(&state).await;

    browser.sign_in("USER@example.com", PASSWORD).await;

    assert!(browser.page.has_title(&user.name));
    assert!(!browser.page.has_link_to("Profile", &paths::user_path(user.id)));
    assert!(browser.page.has_link_to("Sign out", &paths::signout_path()));
    assert!(browser.page.has_link_to("Settings", &paths::edit_user_path(user.id)));
    assert!(browser.page.has_link_to("Users", &paths::users_path()));
    assert!(!browser.page.has_link_to("Sign in", &paths::signin_path()));

    browser.click_link("Sign out").await;

    assert!(browser.page.has_link("Sign in"));
    assert!(!browser.page.has_link("Sign out"));
    assert_eq!(browser.page.path, paths::root_path());
}

#[actix_web::test]
async fn signed_out_visitors_are_sent_to_signin() {
    let state = test_state();
    let user = create_user(&state, "Example User", "user@example.com").await;
    let mut browser = open(&state).await;

    for path in [
        paths::edit_user_path(user.id),
        paths::users_path(),
        paths::following_user_path(user.id),
        paths::followers_user_path(user.id),
    ] {
        browser.visit(&path).await;
        assert_eq!(browser.page.path, paths::signin_path(), "visiting {path}");
        assert!(browser.page.has_flash("notice", "Please sign in."));
    }

    let update = format!("{}?_method=patch", paths::user_path(user.id));
    browser.submit(&update, &[("user[name]", "Hacked")]).await;
    assert_eq!(browser.page.path, paths::signin_path());

    browser
        .submit(&paths::microposts_path(), &[("micropost[content]", "Lorem ipsum")])
        .await;
    assert_eq!(browser.page.path, paths::signin_path());
    assert_eq!(state.microposts.count_by_user(user.id).await.unwrap(), 0);

    browser.delete(&paths::user_path(user.id)).await;
    assert_eq!(browser.page.path, paths::signin_path());
    assert_eq!(user_count(&state).await, 1);

    let reloaded = state.users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.name, "Example User");
}

#[actix_web::test]
async fn signin_forwards_to_the_requested_page() {
    let state = test_state();
    let user = create_user(&state, "Example User", "user@example.com").await;
    let mut browser = open(&state).await;

    browser.visit(&paths::edit_user_path(user.id)).await;
    browser.fill_in("Email", &user.email);
    browser.fill_in("Password", PASSWORD);
    browser.click_button("Sign in").await;

    assert_eq!(browser.page.path, paths::edit_user_path(user.id));
    assert!(browser.page.has_title("Edit user"));

    // Forwarding happens once; the next sign-in goes to the profile.
    browser.click_link("Sign out").await;
    browser.sign_in(&user.email, PASSWORD).await;
    assert_eq!(browser.page.path, paths::user_path(user.id));
}

#[actix_web::test]
async fn users_cannot_edit_each_other() {
    let state = test_state();
    let user = create_user(&state, "Example User", "user@example.com").await;
    let other = create_user(&state, "Wrong User", "wrong@example.com").await;
    let mut browser = open(&state).await;
    browser.sign_in(&user.email, PASSWORD).await;

    browser.visit(&paths::edit_user_path(other.id)).await;
    assert_eq!(browser.page.path, paths::root_path());
    assert!(!browser.page.has_title("Edit user"));

    let update = format!("{}?_method=patch", paths::user_path(other.id));
    browser.submit(&update, &[("user[name]", "Hacked")]).await;
    assert_eq!(browser.page.path, paths::root_path());

    let reloaded = state.users.find_by_id(other.id).await.unwrap().unwrap();
    assert_eq!(reloaded.name, "Wrong User");
}

#[actix_web::test]
async fn non_admins_cannot_delete_users() {
    let state = test_state();
    let user = create_user(&state, "Example User", "user@example.com").await;
    let other = create_user(&state, "Other User", "other@example.com").await;
    let mut browser = open(&state).await;
    browser.sign_in(&user.email, PASSWORD).await;

    browser.delete(&paths::user_path(other.id)).await;

    assert_eq!(browser.page.path, paths::root_path());
    assert_eq!(user_count(&state).await, 2);
}

#[actix_web::test]
async fn admins_cannot_delete_themselves() {
    let state = test_state();
    let admin = create_admin(&state, "Admin", "admin@example.com").await;
    let mut browser = open(&state).await;
    browser.sign_in(&admin.email, PASSWORD).await;

    browser.delete(&paths::user_path(admin.id)).await;

    assert_eq!(browser.page.path, paths::users_path());
    assert!(browser.page.has_flash("error", "Admins cannot delete themselves."));
    assert_eq!(user_count(&state).await, 1);
}

#[actix_web::test]
async fn signed_in_users_cannot_sign_up_again() {
    let state = test_state();
    let user = create_user(&state, "Example User", "user@example.com").await;
    let mut browser = open(&state).await;
    browser.sign_in(&user.email, PASSWORD).await;

    browser.visit(&paths::signup_path()).await;
    assert_eq!(browser.page.path, paths::root_path());

    browser
        .submit(
            &paths::users_path(),
            &[
                ("user[name]", "Second Account"),
                ("user[email]", "second@example.com"),
                ("user[password]", "foobar"),
                ("user[password_confirmation]", "foobar"),
            ],
        )
        .await;
    assert_eq!(browser.page.path, paths::root_path());
    assert_eq!(user_count(&state).await, 1);
}

#[actix_web::test]
async fn signing_in_rotates_the_session_cookie() {
    let state = test_state();
    let user = create_user(&state, "Example User", "user@example.com").await;
    let mut browser = open(&state).await;

    // Forwarding stores a path, which creates a session before sign-in.
    browser.visit(&paths::users_path()).await;
    let before = browser.session_id();
    browser.sign_in(&user.email, PASSWORD).await;

    assert!(before.is_some());
    assert_ne!(browser.session_id(), before);
}
