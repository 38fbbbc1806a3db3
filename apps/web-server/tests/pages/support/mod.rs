//! A small cookie-keeping browser over `actix_web::test`.
//!
//! Follows redirects, treats `data-method="delete"` links as DELETE
//! requests and submits forms the way a person would: by filling labelled
//! fields and clicking a button.

use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, StatusCode, header};
use actix_web::{App, test};

use sample_core::domain::User;
use sample_core::ports::BaseRepository;
use web_server::config::AppConfig;
use web_server::configure_app;
use web_server::middleware::MethodOverride;
use web_server::middleware::session::SESSION_COOKIE;
use web_server::state::AppState;

pub const PASSWORD: &str = "foobar";

/// Fresh in-memory state with cheap password hashing.
pub fn test_state() -> AppState {
    AppState::in_memory(&AppConfig::for_tests())
}

pub async fn create_user(state: &AppState, name: &str, email: &str) -> User {
    let hash = state.passwords.hash(PASSWORD).unwrap();
    state
        .users
        .save(User::new(name, email, hash))
        .await
        .unwrap()
}

pub async fn create_admin(state: &AppState, name: &str, email: &str) -> User {
    let mut admin = create_user(state, name, email).await;
    admin.admin = true;
    state.users.save(admin).await.unwrap()
}

pub async fn user_count(state: &AppState) -> u64 {
    state.users.count().await.unwrap()
}

pub async fn open(
    state: &AppState,
) -> Browser<impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>> {
    let app = test::init_service(
        App::new()
            .wrap(MethodOverride)
            .configure(configure_app(state.clone())),
    )
    .await;

    Browser {
        app,
        session: None,
        pending: Vec::new(),
        page: Page::default(),
    }
}

/// The last page rendered.
#[derive(Debug, Default)]
pub struct Page {
    pub status: StatusCode,
    pub path: String,
    pub body: String,
}

pub struct Browser<S> {
    app: S,
    session: Option<String>,
    pending: Vec<(String, String)>,
    pub page: Page,
}

impl<S> Browser<S>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    pub async fn visit(&mut self, path: &str) {
        self.request(Method::GET, path, None).await;
    }

    pub async fn submit(&mut self, action: &str, fields: &[(&str, &str)]) {
        let fields = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.request(Method::POST, action, Some(fields)).await;
    }

    pub async fn delete(&mut self, path: &str) {
        self.request(Method::DELETE, path, None).await;
    }

    /// Queue a value for the field labelled (or named) `field`; sent by the
    /// next [`Browser::click_button`].
    pub fn fill_in(&mut self, field: &str, value: &str) {
        self.pending.push((field.to_string(), value.to_string()));
    }

    pub async fn click_link(&mut self, text: &str) {
        let link = links(&self.page.body)
            .into_iter()
            .find(|l| l.text == text)
            .unwrap_or_else(|| panic!("no link {text:?} on {}", self.page.path));

        if link.method.as_deref() == Some("delete") {
            self.delete(&link.href).await;
        } else {
            self.visit(&link.href).await;
        }
    }

    pub async fn click_button(&mut self, text: &str) {
        let form = forms(&self.page.body)
            .into_iter()
            .find(|f| f.buttons.iter().any(|b| b == text))
            .unwrap_or_else(|| panic!("no button {text:?} on {}", self.page.path));

        let mut fields: Vec<(String, String)> = form
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect();

        for (key, value) in std::mem::take(&mut self.pending) {
            let name = form
                .fields
                .iter()
                .find(|f| f.label.as_deref() == Some(key.as_str()) || f.name == key)
                .map(|f| f.name.clone())
                .unwrap_or_else(|| panic!("no field {key:?} in form {}", form.action));
            match fields.iter_mut().find(|(n, _)| *n == name) {
                Some(field) => field.1 = value,
                None => fields.push((name, value)),
            }
        }

        self.request(Method::POST, &form.action, Some(fields)).await;
    }

    async fn request(&mut self, method: Method, uri: &str, form: Option<Vec<(String, String)>>) {
        let mut method = method;
        let mut form = form;
        let mut location = uri.to_string();

        for _ in 0..10 {
            let mut req = test::TestRequest::default()
                .method(method.clone())
                .uri(&location);
            if let Some(id) = &self.session {
                req = req.cookie(Cookie::new(SESSION_COOKIE, id.clone()));
            }
            if let Some(fields) = &form {
                req = req.set_form(fields);
            }

            let res = test::call_service(&self.app, req.to_request()).await;

            if let Some(cookie) = res
                .response()
                .cookies()
                .find(|c| c.name() == SESSION_COOKIE)
            {
                self.session = Some(cookie.value().to_string());
            }

            let status = res.status();
            if status.is_redirection() {
                location = res
                    .headers()
                    .get(header::LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .expect("redirect without location")
                    .to_string();
                method = Method::GET;
                form = None;
                continue;
            }

            let body = test::read_body(res).await;
            self.page = Page {
                status,
                path: location,
                body: String::from_utf8(body.to_vec()).unwrap(),
            };
            return;
        }

        panic!("too many redirects from {uri}");
    }

    /// Current session cookie value, if one was issued.
    pub fn session_id(&self) -> Option<String> {
        self.session.clone()
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) {
        self.visit("/signin").await;
        self.fill_in("Email", email);
        self.fill_in("Password", password);
        self.click_button("Sign in").await;
    }
}

impl Page {
    pub fn has_title(&self, text: &str) -> bool {
        inner(&self.body, "title").is_some_and(|t| unescape(t).contains(text))
    }

    pub fn has_heading(&self, text: &str) -> bool {
        elements(&self.body, "h1").any(|h| unescape(h).contains(text))
    }

    /// A link whose whole text is `text`.
    pub fn has_link(&self, text: &str) -> bool {
        links(&self.body).iter().any(|l| l.text == text)
    }

    pub fn has_link_to(&self, text: &str, href: &str) -> bool {
        links(&self.body)
            .iter()
            .any(|l| l.text == text && l.href == href)
    }

    pub fn has_button(&self, text: &str) -> bool {
        forms(&self.body)
            .iter()
            .any(|f| f.buttons.iter().any(|b| b == text))
    }

    /// A flash of the given kind containing `text`; an empty `text` matches
    /// any flash of that kind.
    pub fn has_flash(&self, kind: &str, text: &str) -> bool {
        let open = format!("<div class=\"flash {kind}\">");
        self.body.match_indices(&open).any(|(i, _)| {
            self.body[i + open.len()..]
                .split("</div>")
                .next()
                .is_some_and(|message| unescape(message).contains(text))
        })
    }

    pub fn has_content(&self, text: &str) -> bool {
        unescape(&strip_tags(&self.body)).contains(text)
    }

    /// Text of the element with the given id.
    pub fn text_of(&self, id: &str) -> Option<String> {
        let marker = format!("id=\"{id}\"");
        let start = self.body.find(&marker)?;
        let rest = &self.body[start..];
        let open_end = rest.find('>')?;
        let close = rest[open_end..].find("</")?;
        Some(unescape(&rest[open_end + 1..open_end + close]).trim().to_string())
    }
}

pub struct Link {
    pub href: String,
    pub text: String,
    pub method: Option<String>,
}

pub struct Field {
    pub name: String,
    pub value: String,
    pub label: Option<String>,
}

pub struct Form {
    pub action: String,
    pub fields: Vec<Field>,
    pub buttons: Vec<String>,
}

fn attr(tag: &str, name: &str) -> Option<String> {
    let marker = format!(" {name}=\"");
    let start = tag.find(&marker)? + marker.len();
    let end = tag[start..].find('"')?;
    Some(unescape(&tag[start..start + end]))
}

fn inner<'a>(html: &'a str, tag: &str) -> Option<&'a str> {
    elements(html, tag).next()
}

/// Inner HTML of every `<tag ...>...</tag>`.
fn elements<'a>(html: &'a str, tag: &str) -> impl Iterator<Item = &'a str> {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");
    let mut rest = html;
    std::iter::from_fn(move || {
        loop {
            let start = rest.find(&open)?;
            let after = &rest[start + open.len()..];
            // `<a` must not match `<aside`.
            if !after.starts_with([' ', '>']) {
                rest = after;
                continue;
            }
            let body_start = after.find('>')? + 1;
            let end = after.find(&close)?;
            let item = &after[body_start..end];
            rest = &after[end + close.len()..];
            return Some(item);
        }
    })
}

/// Opening tags `<tag ...>` with their attribute text.
fn tags<'a>(html: &'a str, tag: &str) -> Vec<&'a str> {
    let open = format!("<{tag} ");
    html.match_indices(&open)
        .filter_map(|(i, _)| html[i..].find('>').map(|end| &html[i..i + end + 1]))
        .collect()
}

fn links(html: &str) -> Vec<Link> {
    let mut found = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find("<a ") {
        let after = &rest[start..];
        let Some(open_end) = after.find('>') else { break };
        let Some(close) = after.find("</a>") else { break };
        let tag = &after[..open_end + 1];
        if let Some(href) = attr(tag, "href") {
            found.push(Link {
                href,
                text: unescape(strip_tags(&after[open_end + 1..close]).trim()),
                method: attr(tag, "data-method"),
            });
        }
        rest = &after[close + 4..];
    }
    found
}

fn forms(html: &str) -> Vec<Form> {
    let mut found = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find("<form ") {
        let after = &rest[start..];
        let Some(close) = after.find("</form>") else { break };
        let markup = &after[..close];
        let Some(open_end) = markup.find('>') else { break };
        let action = attr(&markup[..open_end + 1], "action").unwrap_or_default();

        let label_for = |id: &Option<String>| -> Option<String> {
            let id = id.as_ref()?;
            let marker = format!("<label for=\"{id}\">");
            let start = markup.find(&marker)? + marker.len();
            let end = markup[start..].find("</label>")?;
            Some(markup[start..start + end].trim().to_string())
        };

        let mut fields = Vec::new();
        for tag in tags(markup, "input") {
            if let Some(name) = attr(tag, "name") {
                fields.push(Field {
                    label: label_for(&attr(tag, "id")),
                    value: attr(tag, "value").unwrap_or_default(),
                    name,
                });
            }
        }
        for tag in tags(markup, "textarea") {
            if let Some(name) = attr(tag, "name") {
                let content_start = markup.find(tag).map(|i| i + tag.len()).unwrap_or(0);
                let content_end = markup[content_start..]
                    .find("</textarea>")
                    .map(|e| content_start + e)
                    .unwrap_or(content_start);
                fields.push(Field {
                    label: label_for(&attr(tag, "id")),
                    value: unescape(&markup[content_start..content_end]),
                    name,
                });
            }
        }

        let buttons = elements(markup, "button")
            .map(|b| unescape(strip_tags(b).trim()))
            .collect();

        found.push(Form {
            action,
            fields,
            buttons,
        });
        rest = &after[close + 7..];
    }
    found
}

fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

fn unescape(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
