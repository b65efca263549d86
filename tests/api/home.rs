//! The landing page, submitted without scripting.

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;
use wiremock::{
    matchers::{any, body_json, header, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{
    input_value_attr, message_div, submit_is_disabled, TestApp, TEST_WAITLIST_ID,
};

#[tokio::test]
async fn home_renders_an_idle_form() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.home_get().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await?;

    assert!(html.contains("Coming Soon"));
    assert!(html.contains("Join the waitlist"));
    assert!(html.contains(&input_value_attr("email", "")));
    assert!(html.contains(&input_value_attr("name", "")));
    assert!(!submit_is_disabled(&html));
    assert!(html.contains(r#"id="message" class="message" role="status" hidden"#));

    Ok(())
}

#[tokio::test]
async fn home_post_with_empty_email_shows_validation_message() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.waitlist_server)
        .await;

    let cases = [
        vec![("email", ""), ("name", "Jane Smith")],
        vec![("email", "   "), ("name", "Jane Smith")],
        vec![("name", "Jane Smith")],
    ];

    for form in cases {
        let res = app.home_post(&form).await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "form: {form:?}");

        let html = res.text().await?;
        assert!(html.contains(&message_div("error", "Please enter your email address")));
        assert!(html.contains(&input_value_attr("name", "Jane Smith")));
        assert!(!submit_is_disabled(&html));
    }

    Ok(())
}

#[tokio::test]
async fn home_post_valid_signup_is_forwarded_once_and_clears_the_form() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path("/api/subscribers/create"))
        .and(method("POST"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "waitlist": TEST_WAITLIST_ID,
            "email": "jane@example.com",
            "name": "Jane Smith",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "sub_1"})))
        .expect(1)
        .mount(&app.waitlist_server)
        .await;

    let res = app
        .home_post(&[("email", "jane@example.com"), ("name", "Jane Smith")])
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let html = res.text().await?;
    assert!(html.contains(&message_div(
        "success",
        "You have been added to the waitlist!"
    )));
    assert!(html.contains(&input_value_attr("email", "")));
    assert!(html.contains(&input_value_attr("name", "")));
    assert!(!submit_is_disabled(&html));

    Ok(())
}

#[tokio::test]
async fn home_post_without_name_omits_it_from_the_request() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(body_json(json!({
        "waitlist": TEST_WAITLIST_ID,
        "email": "jane@example.com",
    })))
    .respond_with(ResponseTemplate::new(201))
    .expect(1)
    .mount(&app.waitlist_server)
    .await;

    let res = app
        .home_post(&[("email", "jane@example.com"), ("name", "")])
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn home_post_rejected_signup_keeps_fields_and_shows_server_message() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "Email already on the list"})),
        )
        .expect(1)
        .mount(&app.waitlist_server)
        .await;

    let res = app
        .home_post(&[("email", "jane@example.com"), ("name", "Jane Smith")])
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

    let html = res.text().await?;
    assert!(html.contains(&message_div("error", "Email already on the list")));
    assert!(html.contains(&input_value_attr("email", "jane@example.com")));
    assert!(html.contains(&input_value_attr("name", "Jane Smith")));
    assert!(!submit_is_disabled(&html));

    Ok(())
}

#[tokio::test]
async fn home_post_rejection_without_message_falls_back() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.waitlist_server)
        .await;

    let res = app.home_post(&[("email", "jane@example.com")]).await?;
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

    let html = res.text().await?;
    assert!(html.contains(&message_div("error", "Something went wrong")));
    assert!(html.contains(&input_value_attr("email", "jane@example.com")));

    Ok(())
}

#[tokio::test]
async fn home_post_without_waitlist_id_never_calls_the_waitlist() -> Result<()> {
    let app = TestApp::spawn_with_waitlist_id(None).await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.waitlist_server)
        .await;

    let res = app.home_post(&[("email", "jane@example.com")]).await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let html = res.text().await?;
    assert!(html.contains(&message_div(
        "error",
        "Waitlist ID not configured. Please check your deployment settings."
    )));
    assert!(html.contains(&input_value_attr("email", "jane@example.com")));

    Ok(())
}

#[tokio::test]
async fn home_post_escapes_entered_values() -> Result<()> {
    let app = TestApp::spawn_with_waitlist_id(None).await?;

    let res = app
        .home_post(&[("email", "jane@example.com"), ("name", "\"><b>Jane</b>")])
        .await?;
    let html = res.text().await?;

    assert!(!html.contains("<b>Jane</b>"));
    assert!(html.contains("&lt;b&gt;Jane&lt;"));

    Ok(())
}
