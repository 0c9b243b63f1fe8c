// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie jar with persistent, host-keyed storage
//!
//! The jar contract required by the transport is synchronous, so lookups hit
//! an in-memory cache only. The cache is mirrored from a [`CookieStore`] at
//! construction and written back on every response that sets cookies.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::store::CookieStore;

/// A single HTTP cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Domain the cookie belongs to
    pub domain: String,
    /// Path the cookie is valid for
    pub path: String,
    /// Expiration time (None = session cookie)
    pub expires: Option<DateTime<Utc>>,
    /// Secure flag (HTTPS only)
    pub secure: bool,
    /// HttpOnly flag
    pub http_only: bool,
    /// SameSite attribute
    pub same_site: SameSite,
}

/// SameSite cookie attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SameSite {
    /// Cookie sent with all requests
    #[default]
    None,
    /// Cookie sent with same-site and top-level navigations
    Lax,
    /// Cookie only sent with same-site requests
    Strict,
}

impl Cookie {
    /// Create a new cookie
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: String::new(),
            path: "/".to_string(),
            expires: None,
            secure: false,
            http_only: false,
            same_site: SameSite::default(),
        }
    }

    /// Set the domain
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Set the path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set expiration time
    pub fn expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Check if the cookie is expired
    pub fn is_expired(&self) -> bool {
        self.expires.map_or(false, |exp| exp < Utc::now())
    }

    /// Check if the cookie applies to the given URL
    pub fn matches(&self, url: &Url) -> bool {
        let host = url.host_str().unwrap_or("");
        if !self.domain_matches(host) {
            return false;
        }

        if !url.path().starts_with(&self.path) {
            return false;
        }

        if self.secure && url.scheme() != "https" {
            return false;
        }

        !self.is_expired()
    }

    fn domain_matches(&self, host: &str) -> bool {
        if self.domain.is_empty() {
            return true;
        }

        let domain = self.domain.trim_start_matches('.');
        host == domain || host.ends_with(&format!(".{}", domain))
    }

    /// Parse a Set-Cookie header value
    pub fn parse(header: &str, url: &Url) -> Option<Self> {
        let mut parts = header.split(';');
        let first = parts.next()?.trim();

        let (name, value) = first.split_once('=')?;
        let mut cookie = Cookie::new(name.trim(), value.trim());

        // Default domain to request host
        cookie.domain = url.host_str().unwrap_or("").to_string();

        for part in parts {
            let part = part.trim();
            if let Some((attr, val)) = part.split_once('=') {
                let attr = attr.trim().to_lowercase();
                let val = val.trim();
                match attr.as_str() {
                    "domain" => cookie.domain = val.trim_start_matches('.').to_string(),
                    "path" => cookie.path = val.to_string(),
                    "expires" => {
                        if let Ok(dt) = DateTime::parse_from_rfc2822(val) {
                            cookie.expires = Some(dt.with_timezone(&Utc));
                        }
                    }
                    "max-age" => {
                        if let Ok(secs) = val.parse::<i64>() {
                            cookie.expires = Some(Utc::now() + chrono::Duration::seconds(secs));
                        }
                    }
                    "samesite" => {
                        cookie.same_site = match val.to_lowercase().as_str() {
                            "strict" => SameSite::Strict,
                            "lax" => SameSite::Lax,
                            _ => SameSite::None,
                        };
                    }
                    _ => {}
                }
            } else {
                match part.to_lowercase().as_str() {
                    "secure" => cookie.secure = true,
                    "httponly" => cookie.http_only = true,
                    _ => {}
                }
            }
        }

        Some(cookie)
    }

    /// Convert to Cookie header format
    pub fn to_header_value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }

    /// Encode in Set-Cookie format, the representation used by the
    /// persistent store. `parse` is the inverse.
    pub fn encode(&self) -> String {
        let mut out = format!("{}={}", self.name, self.value);
        if !self.domain.is_empty() {
            out.push_str(&format!("; Domain={}", self.domain));
        }
        out.push_str(&format!("; Path={}", self.path));
        if let Some(expires) = self.expires {
            out.push_str(&format!("; Expires={}", expires.to_rfc2822()));
        }
        match self.same_site {
            SameSite::Lax => out.push_str("; SameSite=Lax"),
            SameSite::Strict => out.push_str("; SameSite=Strict"),
            SameSite::None => {}
        }
        if self.secure {
            out.push_str("; Secure");
        }
        if self.http_only {
            out.push_str("; HttpOnly");
        }
        out
    }
}

/// Persistent, cached cookie jar.
///
/// The cache entry for a host is replaced wholesale on every response that
/// sets cookies; old cookies for that host are discarded, not merged.
/// Persistence is best-effort: writes are detached tasks and never block the
/// request that triggered them.
#[derive(Clone)]
pub struct CookieManager {
    cache: Arc<DashMap<String, Vec<Cookie>>>,
    store: Arc<dyn CookieStore>,
}

impl CookieManager {
    /// Create a jar backed by the given store.
    ///
    /// Persisted cookies load asynchronously; a request racing the load sees
    /// an empty list for its host, which is an accepted staleness window.
    /// Hosts or cookie strings that fail to parse are discarded.
    pub fn new(store: Arc<dyn CookieStore>) -> Self {
        let cache: Arc<DashMap<String, Vec<Cookie>>> = Arc::new(DashMap::new());

        let warm_cache = cache.clone();
        let warm_store = store.clone();
        tokio::spawn(async move {
            match warm_store.all().await {
                Ok(entries) => {
                    for (host, raw) in entries {
                        let Ok(url) = Url::parse(&format!("https://{}/", host)) else {
                            continue;
                        };
                        let cookies: Vec<Cookie> = raw
                            .iter()
                            .filter_map(|header| Cookie::parse(header, &url))
                            .collect();
                        if !cookies.is_empty() {
                            warm_cache.insert(host, cookies);
                        }
                    }
                }
                Err(e) => tracing::warn!(error = %e, "failed to load persisted cookies"),
            }
        });

        Self { cache, store }
    }

    /// Save cookies from a response.
    ///
    /// The cache is updated synchronously and is visible to the very next
    /// request; the persistent write is spawned and not awaited.
    pub fn save_from_response(&self, url: &Url, cookies: Vec<Cookie>) {
        let Some(host) = url.host_str() else {
            return;
        };
        let host = host.to_string();
        self.cache.insert(host.clone(), cookies.clone());

        let store = self.store.clone();
        let encoded: Vec<String> = cookies.iter().map(Cookie::encode).collect();
        tokio::spawn(async move {
            if let Err(e) = store.save(&host, encoded).await {
                tracing::warn!(host = %host, error = %e, "cookie persistence failed");
            }
        });
    }

    /// Load cookies for a request: an owned copy of the host's entry, empty
    /// when absent. Never touches I/O.
    pub fn load_for_request(&self, url: &Url) -> Vec<Cookie> {
        url.host_str()
            .and_then(|host| self.cache.get(host).map(|entry| entry.value().clone()))
            .unwrap_or_default()
    }

    /// Drop every cookie from the cache and the backing store.
    pub async fn clear(&self) -> crate::error::Result<()> {
        self.cache.clear();
        self.store.clear().await
    }
}
