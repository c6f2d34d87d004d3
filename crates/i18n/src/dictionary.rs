//! Translated UI strings.
//!
//! Keys are dotted and grouped by page area (`header.*`, `auth.*`,
//! `footer.*`, `carousel.*`).  Booking form messages keep the Spanish keys
//! the templates use (`reservas.errores.*`).  Spanish is the reference
//! table: every key a page uses must exist there.

use std::collections::{BTreeMap, HashMap};

use pl_domain::locale::Locale;

pub type Table = &'static [(&'static str, &'static str)];

const ES: Table = &[
    ("header.home", "Inicio"),
    ("header.company", "La empresa"),
    ("header.howitworks", "Cómo funciona"),
    ("header.prices", "Tarifas"),
    ("header.booking", "Reservar"),
    ("header.extraservices", "Servicios adicionales"),
    ("header.location", "Localización"),
    ("auth.login", "Iniciar sesión"),
    ("auth.register", "Registrarse"),
    ("auth.logout", "Cerrar sesión"),
    ("auth.myprofile", "Mi perfil"),
    ("footer.airport", "Aeropuerto"),
    ("footer.office", "Oficina"),
    ("footer.partners", "Colaboradores"),
    ("footer.secure", "Protegidos y asegurados por"),
    ("footer.longterm", "Parking de larga estancia"),
    ("footer.legalnotices", "Avisos legales"),
    ("footer.cookiespolicy", "Política de cookies"),
    ("footer.privacypolicy", "Política de privacidad"),
    ("carousel.title01", "Plazas al aire libre"),
    ("carousel.button01", "Más información"),
    ("carousel.title02", "Atención personalizada"),
    ("carousel.text02", "Servicio de recogida y entrega del vehículo en la misma terminal"),
    ("carousel.button02", "Reservar ahora"),
    ("carousel.title03", "Plazas cubiertas"),
    ("carousel.button03", "Más información"),
    ("carousel.title04", "Parking"),
    ("carousel.text04", "Estación de tren de Alicante"),
    ("carousel.button04", "Llame ahora"),
    ("carousel.title05", "Parking"),
    ("carousel.text05", "Aeropuerto Alicante-Elche"),
    ("carousel.button05", "Contáctenos"),
    ("reservas.errores.nombreRequerido", "El nombre es obligatorio"),
];

const EN: Table = &[
    ("header.home", "Home"),
    ("header.company", "Company"),
    ("header.howitworks", "How it works"),
    ("header.prices", "Prices"),
    ("header.booking", "Booking"),
    ("header.extraservices", "Extra services"),
    ("header.location", "Location"),
    ("auth.login", "Login"),
    ("auth.register", "Register"),
    ("auth.logout", "Logout"),
    ("auth.myprofile", "My Profile"),
    ("footer.airport", "Airport"),
    ("footer.office", "Office"),
    ("footer.partners", "Partners"),
    ("footer.secure", "Secured and insured by"),
    ("footer.longterm", "Long-term parking"),
    ("footer.legalnotices", "Legal notices"),
    ("footer.cookiespolicy", "Cookies policy"),
    ("footer.privacypolicy", "Privacy policy"),
    ("carousel.title01", "Outdoor parking"),
    ("carousel.button01", "More info"),
    ("carousel.title02", "Personalized attention"),
    ("carousel.text02", "Collection and delivery service of the vehicle at the same terminal"),
    ("carousel.button02", "Book now"),
    ("carousel.title03", "Indoor parking"),
    ("carousel.button03", "More info"),
    ("carousel.title04", "Parking"),
    ("carousel.text04", "Alicante Train Station"),
    ("carousel.button04", "Call now"),
    ("carousel.title05", "Parking"),
    ("carousel.text05", "Alicante-Elche Airport"),
    ("carousel.button05", "Contact us"),
];

const NL: Table = &[
    ("header.home", "Home"),
    ("header.company", "Bedrijf"),
    ("header.howitworks", "Hoe het werkt"),
    ("header.prices", "Prijzen"),
    ("header.booking", "Reservering"),
    ("header.extraservices", "Extra diensten"),
    ("header.location", "Locatie"),
    ("auth.login", "Inloggen"),
    ("auth.register", "Registreren"),
    ("auth.logout", "Uitloggen"),
    ("auth.myprofile", "Mijn profiel"),
    ("footer.airport", "Luchthaven"),
    ("footer.office", "Kantoor"),
    ("footer.partners", "Partners"),
    ("footer.secure", "Beveiligd en verzekerd door"),
    ("footer.longterm", "Lang parkeren"),
    ("footer.legalnotices", "Juridische kennisgevingen"),
    ("footer.cookiespolicy", "Cookiebeleid"),
    ("footer.privacypolicy", "Privacybeleid"),
    ("carousel.title01", "Openlucht parkeerplaatsen"),
    ("carousel.button01", "Meer informatie"),
    ("carousel.title02", "Persoonlijke aandacht"),
    ("carousel.text02", "Ophaal- en bezorgservice van het voertuig op dezelfde terminal"),
    ("carousel.button02", "Boek nu"),
    ("carousel.title03", "Overdekte parkeerplaatsen"),
    ("carousel.button03", "Meer informatie"),
    ("carousel.title04", "Parking"),
    ("carousel.text04", "Treinstation Alicante"),
    ("carousel.button04", "Bel nu"),
    ("carousel.title05", "Parking"),
    ("carousel.text05", "Luchthaven Alicante-Elche"),
    ("carousel.button05", "Neem contact met ons op"),
];

/// Translated strings for every locale.
#[derive(Debug, Clone)]
pub struct Dictionary {
    entries: HashMap<Locale, HashMap<&'static str, &'static str>>,
}

impl Dictionary {
    /// The strings shipped with the site.
    pub fn builtin() -> Self {
        Self::from_tables(&[(Locale::Es, ES), (Locale::En, EN), (Locale::Nl, NL)])
    }

    pub fn from_tables(tables: &[(Locale, Table)]) -> Self {
        let mut entries: HashMap<Locale, HashMap<&'static str, &'static str>> = HashMap::new();
        for (locale, table) in tables {
            entries
                .entry(*locale)
                .or_default()
                .extend(table.iter().copied());
        }
        Self { entries }
    }

    pub fn get(&self, locale: Locale, key: &str) -> Option<&'static str> {
        self.entries.get(&locale)?.get(key).copied()
    }

    /// All keys defined for `locale`, sorted.
    pub fn keys(&self, locale: Locale) -> Vec<&'static str> {
        let mut keys: Vec<_> = self
            .entries
            .get(&locale)
            .map(|t| t.keys().copied().collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    /// Keys present in `reference` but absent from `locale`, sorted.
    pub fn missing(&self, reference: Locale, locale: Locale) -> Vec<&'static str> {
        self.keys(reference)
            .into_iter()
            .filter(|k| self.get(locale, k).is_none())
            .collect()
    }

    /// Per-locale key counts, for reporting.
    pub fn sizes(&self) -> BTreeMap<Locale, usize> {
        self.entries.iter().map(|(l, t)| (*l, t.len())).collect()
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::builtin()
    }
}
