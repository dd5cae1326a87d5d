//! 서버 렌더링 페이지
//!
//! 템플릿 엔진 없이 `format!`으로 작은 HTML 문서를 만듭니다.
//! 사용자 입력은 모두 [`escape_html`]을 거칩니다.

use crate::{
    config::OAuthProvider,
    domain::{dto::users::response::ConfessionEntry, models::auth::CurrentUser},
    utils::string_utils::escape_html,
};

const SITE_TITLE: &str = "Confessions";

fn layout(title: &str, current: Option<&CurrentUser>, body: &str) -> String {
    let nav = match current {
        Some(current) => format!(
            r#"<span class="user">{}</span> <a href="/confessions">Confessions</a> <a href="/submit">Submit</a> <a href="/logout">Log Out</a>"#,
            escape_html(&current.user.display_name())
        ),
        None => r#"<a href="/login">Login</a> <a href="/register">Register</a>"#.to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {site}</title>
</head>
<body>
<nav><a href="/">{site}</a> {nav}</nav>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape_html(title),
        site = SITE_TITLE,
        nav = nav,
        body = body,
    )
}

fn provider_buttons(providers: &[OAuthProvider], verb: &str) -> String {
    providers
        .iter()
        .map(|provider| {
            format!(
                r#"<a class="btn btn-{id}" href="{path}">{verb} with {name}</a>"#,
                id = provider.as_str(),
                path = provider.login_path(),
                verb = verb,
                name = provider.display_name(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn credentials_form(action: &str, submit_label: &str) -> String {
    format!(
        r#"<form action="{action}" method="POST">
<label for="username">Username</label>
<input type="text" id="username" name="username" required>
<label for="password">Password</label>
<input type="password" id="password" name="password" required>
<button type="submit">{label}</button>
</form>"#,
        action = action,
        label = submit_label,
    )
}

pub fn home_page(current: Option<&CurrentUser>) -> String {
    let actions = if current.is_some() {
        r#"<a class="btn" href="/confessions">See Confessions</a> <a class="btn" href="/submit">Submit a Confession</a>"#
    } else {
        r#"<a class="btn" href="/register">Register</a> <a class="btn" href="/login">Login</a>"#
    };

    let body = format!(
        r#"<h1>Confessions</h1>
<p>Don't keep your secrets, share them anonymously!</p>
{}"#,
        actions
    );

    layout("Home", current, &body)
}

pub fn register_page(current: Option<&CurrentUser>, providers: &[OAuthProvider]) -> String {
    let body = format!(
        "<h1>Register</h1>\n{}\n{}",
        credentials_form("/register", "Register"),
        provider_buttons(providers, "Sign Up")
    );

    layout("Register", current, &body)
}

pub fn login_page(current: Option<&CurrentUser>, providers: &[OAuthProvider]) -> String {
    let body = format!(
        "<h1>Login</h1>\n{}\n{}",
        credentials_form("/login", "Login"),
        provider_buttons(providers, "Sign In")
    );

    layout("Login", current, &body)
}

pub fn confessions_page(current: &CurrentUser, entries: &[ConfessionEntry]) -> String {
    let list = if entries.is_empty() {
        "<p>No confessions yet.</p>".to_string()
    } else {
        entries
            .iter()
            .map(|entry| format!(r#"<p class="confession">{}</p>"#, escape_html(&entry.text)))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let body = format!(
        r#"<h1>You've Discovered My Confession!</h1>
{}
<a class="btn" href="/submit">Submit a Confession</a>"#,
        list
    );

    layout("Confessions", Some(current), &body)
}

pub fn submit_page(current: &CurrentUser) -> String {
    let body = r#"<h1>Confessions</h1>
<p>Don't keep your secrets, share them anonymously!</p>
<form action="/submit" method="POST">
<input type="text" name="confession" placeholder="What's your confession?">
<button type="submit">Submit</button>
</form>"#;

    layout("Submit", Some(current), body)
}

pub fn not_found_page() -> String {
    layout(
        "Not Found",
        None,
        r#"<h1>Page not found</h1>
<a href="/">Back to home</a>"#,
    )
}
