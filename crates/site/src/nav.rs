//! Header navigation view-model.
//!
//! Everything the page header needs, already translated and localized: the
//! main links plus either the anonymous (login/register) or the signed-in
//! (profile/logout) auth links.  [`NavBinding`] keeps one up to date with
//! the session mirror.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use pl_domain::identity::Identity;
use pl_i18n::{I18n, Locale};
use pl_sessions::{SessionMirror, Subscription};

/// `(dictionary key, locale-free path)` of each main header link.
const HEADER_LINKS: &[(&str, &str)] = &[
    ("header.home", "/"),
    ("header.company", "/company"),
    ("header.howitworks", "/how-it-works"),
    ("header.prices", "/prices"),
    ("header.booking", "/booking"),
    ("header.extraservices", "/extra-services"),
    ("header.location", "/location"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuthLinks {
    Anonymous {
        login: NavLink,
        register: NavLink,
    },
    Authenticated {
        display_name: String,
        profile: NavLink,
        logout: NavLink,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderNav {
    pub locale: Locale,
    pub links: Vec<NavLink>,
    pub auth: AuthLinks,
    /// The current page in every enabled locale.
    pub languages: Vec<LanguageLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageLink {
    pub locale: Locale,
    pub name: String,
    pub href: String,
}

impl HeaderNav {
    /// Header for `locale`, rendered for `current_path`, as seen by `identity`.
    pub fn build(
        i18n: &I18n,
        locale: Locale,
        current_path: &str,
        identity: Option<&Identity>,
    ) -> Self {
        let t = i18n.translator(locale);
        let link = |key: &str, path: &str| NavLink {
            label: t.t(key).to_owned(),
            href: i18n.localized_path(path, locale),
        };

        let links = HEADER_LINKS
            .iter()
            .map(|&(key, path)| link(key, path))
            .collect();

        let auth = match identity {
            None => AuthLinks::Anonymous {
                login: link("auth.login", "/login"),
                register: link("auth.register", "/register"),
            },
            Some(user) => AuthLinks::Authenticated {
                display_name: user.display_name().to_owned(),
                profile: link("auth.myprofile", "/profile"),
                logout: link("auth.logout", "/logout"),
            },
        };

        let languages = i18n
            .alternates(current_path)
            .into_iter()
            .map(|(l, href)| LanguageLink {
                locale: l,
                name: l.native_name().to_owned(),
                href,
            })
            .collect();

        Self {
            locale,
            links,
            auth,
            languages,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth, AuthLinks::Authenticated { .. })
    }
}

/// A header kept current with the session mirror.
///
/// Rebuilt on every mirror update; [`current`](Self::current) always
/// reflects the latest identity.
pub struct NavBinding {
    nav: Arc<RwLock<HeaderNav>>,
    subscription: Subscription,
}

impl NavBinding {
    pub fn bind(
        mirror: &SessionMirror,
        i18n: Arc<I18n>,
        locale: Locale,
        current_path: impl Into<String>,
    ) -> Self {
        let current_path = current_path.into();
        let initial = HeaderNav::build(&i18n, locale, &current_path, None);
        let nav = Arc::new(RwLock::new(initial));

        let target = Arc::clone(&nav);
        let subscription = mirror.subscribe(move |identity| {
            let rebuilt = HeaderNav::build(&i18n, locale, &current_path, identity);
            tracing::debug!(
                %locale,
                authenticated = rebuilt.is_authenticated(),
                "header rebuilt"
            );
            *target.write() = rebuilt;
        });

        Self { nav, subscription }
    }

    pub fn current(&self) -> HeaderNav {
        self.nav.read().clone()
    }

    /// Stop following the mirror.  The last header stays readable.
    pub fn unbind(&self) {
        self.subscription.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pl_domain::config::I18nConfig;

    fn i18n() -> I18n {
        I18n::from_config(&I18nConfig::default()).unwrap()
    }

    #[test]
    fn anonymous_header_in_english() {
        let nav = HeaderNav::build(&i18n(), Locale::En, "/en/prices", None);
        assert_eq!(nav.links.len(), 7);
        assert_eq!(
            nav.links[3],
            NavLink {
                label: "Prices".into(),
                href: "/en/prices".into()
            }
        );
        match &nav.auth {
            AuthLinks::Anonymous { login, register } => {
                assert_eq!(login.label, "Login");
                assert_eq!(login.href, "/en/login");
                assert_eq!(register.label, "Register");
            }
            other => panic!("expected anonymous links, got {other:?}"),
        }
    }

    #[test]
    fn signed_in_header_in_spanish() {
        let user = Identity::new("u1").with_email("ana@example.com");
        let nav = HeaderNav::build(&i18n(), Locale::Es, "/", Some(&user));
        assert_eq!(nav.links[0].href, "/");
        assert_eq!(nav.links[0].label, "Inicio");
        match &nav.auth {
            AuthLinks::Authenticated {
                display_name,
                profile,
                logout,
            } => {
                assert_eq!(display_name, "ana@example.com");
                assert_eq!(profile.label, "Mi perfil");
                assert_eq!(profile.href, "/profile");
                assert_eq!(logout.label, "Cerrar sesión");
            }
            other => panic!("expected authenticated links, got {other:?}"),
        }
    }

    #[test]
    fn language_picker_points_at_same_page() {
        let nav = HeaderNav::build(&i18n(), Locale::Nl, "/nl/booking", None);
        let hrefs: Vec<_> = nav.languages.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(hrefs, vec!["/en/booking", "/nl/booking", "/booking"]);
        assert_eq!(nav.languages[1].name, "Nederlands");
    }

    #[test]
    fn serializes_auth_state_tag() {
        let nav = HeaderNav::build(&i18n(), Locale::En, "/", None);
        let json = serde_json::to_value(&nav).unwrap();
        assert_eq!(json["auth"]["state"], "anonymous");
        assert_eq!(json["locale"], "en");
    }
}
