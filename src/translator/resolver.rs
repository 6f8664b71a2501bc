//! Resolves a step's target references into one endpoint and one credential
//! requirement.

use crate::error::TargetIssue;
use crate::playbook::{Address, AuthenticationInfo, Target};
use crate::workflow::Parameter;
use ahash::AHashMap;
use std::fmt;

const SUPPORTED_AUTH_TYPES: [&str; 3] = ["basic", "http-basic", "user-auth"];

/// The outcome of resolving a step's targets. Resolution never fails; what
/// could not be resolved is listed in `issues`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub endpoint: Option<Endpoint>,
    pub auth: Option<AuthRequirement>,
    pub issues: Vec<TargetIssue>,
}

/// A scheme-qualified base address, e.g. `https://example.com:8443`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
}

impl Endpoint {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Appends a request path, collapsing a doubled slash at the seam.
    pub fn join(&self, path: &str) -> String {
        match self.base.strip_suffix('/') {
            Some(trimmed) if path.starts_with('/') => format!("{}{}", trimmed, path),
            _ => format!("{}{}", self.base, path),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

/// A credential requirement that surfaces as blank configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    Basic,
}

impl AuthRequirement {
    /// Fresh `username`/`password` placeholders for one action.
    pub fn parameters(&self) -> Vec<Parameter> {
        match self {
            AuthRequirement::Basic => vec![
                Parameter::placeholder("username"),
                Parameter::placeholder("password"),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    Domain,
    Url,
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    pub fn label(&self) -> &'static str {
        match self {
            AddressFamily::Domain => "domain",
            AddressFamily::Url => "url",
            AddressFamily::Ipv4 => "ipv4",
            AddressFamily::Ipv6 => "ipv6",
        }
    }
}

/// Resolves the first target reference found in `targets` and, through it,
/// the target's authentication.
pub fn resolve(
    references: &[String],
    targets: &AHashMap<String, Target>,
    auths: &AHashMap<String, AuthenticationInfo>,
) -> Resolution {
    let mut resolution = Resolution::default();

    let Some((index, name, target)) = references
        .iter()
        .enumerate()
        .find_map(|(i, name)| targets.get(name).map(|target| (i, name, target)))
    else {
        resolution.issues.extend(
            references
                .iter()
                .map(|name| TargetIssue::UnknownTarget(name.clone())),
        );
        return resolution;
    };

    resolution.issues.extend(
        references[..index]
            .iter()
            .map(|name| TargetIssue::UnknownTarget(name.clone())),
    );
    let ignored = references[index + 1..].to_vec();
    if !ignored.is_empty() {
        resolution
            .issues
            .push(TargetIssue::ExtraTargetsIgnored { ignored });
    }

    match select_address(&target.address) {
        Some((family, values)) => {
            if values.len() > 1 {
                resolution.issues.push(TargetIssue::ExtraAddressesIgnored {
                    target: name.clone(),
                    family: family.label(),
                    count: values.len(),
                });
            }
            resolution.endpoint = Some(build_endpoint(family, &values[0], target.port.as_deref()));
        }
        None => resolution
            .issues
            .push(TargetIssue::TargetWithoutAddress(name.clone())),
    }

    match resolve_auth(target, auths) {
        Ok(auth) => resolution.auth = auth,
        Err(issue) => resolution.issues.push(issue),
    }

    resolution
}

/// Picks the first populated address family in precedence order:
/// domain, URL, IPv4, IPv6.
pub fn select_address(address: &Address) -> Option<(AddressFamily, &[String])> {
    [
        (AddressFamily::Domain, &address.domain),
        (AddressFamily::Url, &address.url),
        (AddressFamily::Ipv4, &address.ipv4),
        (AddressFamily::Ipv6, &address.ipv6),
    ]
    .into_iter()
    .find(|(_, values)| !values.is_empty())
    .map(|(family, values)| (family, values.as_slice()))
}

/// Builds the base URL for an address value. URL values are taken verbatim;
/// other families get `https://` on port 443 and `http://` otherwise. A
/// non-default port is added unless the value already carries one.
pub fn build_endpoint(family: AddressFamily, value: &str, port: Option<&str>) -> Endpoint {
    let base = match family {
        AddressFamily::Url => value.to_string(),
        AddressFamily::Domain | AddressFamily::Ipv4 | AddressFamily::Ipv6 => {
            let scheme = if port == Some("443") {
                "https://"
            } else {
                "http://"
            };
            let host = if family == AddressFamily::Ipv6 && !value.starts_with('[') {
                format!("[{}]", value)
            } else {
                value.to_string()
            };
            format!("{}{}", scheme, host)
        }
    };

    let base = match port.filter(|p| !p.is_empty() && *p != "80" && *p != "443") {
        Some(port) if !has_port(&base) => insert_port(&base, port),
        _ => base,
    };
    Endpoint::new(base)
}

fn resolve_auth(
    target: &Target,
    auths: &AHashMap<String, AuthenticationInfo>,
) -> Result<Option<AuthRequirement>, TargetIssue> {
    let Some(reference) = target.authentication_info.as_deref().filter(|r| !r.is_empty()) else {
        return Ok(None);
    };
    let auth = auths
        .get(reference)
        .ok_or_else(|| TargetIssue::UnknownAuthentication(reference.to_string()))?;

    if SUPPORTED_AUTH_TYPES.contains(&auth.auth_type.as_str()) {
        Ok(Some(AuthRequirement::Basic))
    } else {
        Err(TargetIssue::UnsupportedAuthentication(auth.auth_type.clone()))
    }
}

/// Byte range of the authority (`user@host:port`) within a URL-like string.
fn authority_bounds(base: &str) -> (usize, usize) {
    let start = base.find("://").map_or(0, |i| i + 3);
    let end = base[start..]
        .find(['/', '?', '#'])
        .map_or(base.len(), |i| start + i);
    (start, end)
}

fn has_port(base: &str) -> bool {
    let (start, end) = authority_bounds(base);
    let authority = &base[start..end];
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    if host_port.starts_with('[') {
        host_port.contains("]:")
    } else {
        host_port.contains(':')
    }
}

fn insert_port(base: &str, port: &str) -> String {
    let (_, end) = authority_bounds(base);
    format!("{}:{}{}", &base[..end], port, &base[end..])
}
