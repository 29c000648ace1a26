use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::str::FromStr;

use http::uri::Authority;
use vellum_error::{ErrorContext as _, OpaqueError};
use vellum_utils::collections::NonEmptyVec;

use crate::util::{csv, is_token, parse_authority, quote_if_needed, split_param, token_or_quoted};
use crate::{HeaderDecode, HeaderEncode};

/// `Forwarded` header, defined in [RFC7239](https://datatracker.ietf.org/doc/html/rfc7239)
///
/// Discloses information about the client and the proxies a request
/// passed through, information that would otherwise be altered or lost
/// when a proxy is involved.
///
/// # ABNF
///
/// ```text
/// Forwarded   = 1#forwarded-element
///
/// forwarded-element =
///     [ forwarded-pair ] *( ";" [ forwarded-pair ] )
///
/// forwarded-pair = token "=" value
/// value          = token / quoted-string
/// ```
///
/// Parameter names are case-insensitive and may appear once per element.
/// Values are written as a token when possible and quoted otherwise, with
/// only `\` and `"` escaped.
///
/// # Example values
///
/// * `for="_gazonk"`
/// * `For="[2001:db8:cafe::17]:4711"`
/// * `for=192.0.2.60;proto=http;by=203.0.113.43`
/// * `for=192.0.2.43, for=198.51.100.17`
///
/// # Example
///
/// ```
/// use std::net::{IpAddr, Ipv4Addr};
/// use vellum_http_headers::{Forwarded, ForwardedElement};
///
/// let element = ForwardedElement::forwarded_for(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 60)))
///     .with_proto("https")
///     .unwrap();
/// let forwarded = Forwarded::new(element);
/// assert_eq!(forwarded.to_string(), "for=192.0.2.60;proto=https");
/// assert_eq!(forwarded.client_ip(), Some(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 60))));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Forwarded(NonEmptyVec<ForwardedElement>);

impl Forwarded {
    /// Create the header with a single element.
    #[must_use]
    pub fn new(element: ForwardedElement) -> Self {
        Self(NonEmptyVec::new(element))
    }

    /// Append the element of the next hop.
    #[must_use]
    pub fn with_element(mut self, element: ForwardedElement) -> Self {
        self.0.push(element);
        self
    }

    /// Iterate over the elements, client side first.
    pub fn iter(&self) -> std::slice::Iter<'_, ForwardedElement> {
        self.0.iter()
    }

    /// The IP of the original client, if the first hop disclosed it.
    #[must_use]
    pub fn client_ip(&self) -> Option<IpAddr> {
        self.0.first().for_node().and_then(ForwardedNode::ip)
    }
}

impl HeaderDecode for Forwarded {
    fn decode<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        csv::decode_non_empty_list(values, csv::Separator::Comma, ForwardedElement::parse)
            .map(Self)
    }
}

impl HeaderEncode for Forwarded {
    fn encode<E: Extend<String>>(&self, values: &mut E) {
        values.extend(std::iter::once(self.to_string()));
    }
}

impl fmt::Display for Forwarded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&csv::encode_list(self.0.iter(), csv::Separator::Comma))
    }
}

/// A single hop in the [`Forwarded`] chain.
///
/// Always carries at least one parameter, so it is built from one of the
/// `forwarded_*` constructors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForwardedElement {
    by_node: Option<ForwardedNode>,
    for_node: Option<ForwardedNode>,
    host: Option<Authority>,
    proto: Option<String>,
    extensions: Vec<(String, String)>,
}

impl ForwardedElement {
    const fn empty() -> Self {
        Self {
            by_node: None,
            for_node: None,
            host: None,
            proto: None,
            extensions: Vec::new(),
        }
    }

    /// An element with only the `for` parameter.
    #[must_use]
    pub fn forwarded_for(node: impl Into<ForwardedNode>) -> Self {
        Self::empty().with_for(node)
    }

    /// An element with only the `by` parameter.
    #[must_use]
    pub fn forwarded_by(node: impl Into<ForwardedNode>) -> Self {
        Self::empty().with_by(node)
    }

    /// An element with only the `host` parameter.
    pub fn forwarded_host(host: &str) -> Result<Self, OpaqueError> {
        Self::empty().with_host(host)
    }

    /// An element with only the `proto` parameter.
    pub fn forwarded_proto(proto: &str) -> Result<Self, OpaqueError> {
        Self::empty().with_proto(proto)
    }

    fn is_empty(&self) -> bool {
        self.by_node.is_none()
            && self.for_node.is_none()
            && self.host.is_none()
            && self.proto.is_none()
            && self.extensions.is_empty()
    }

    /// Set the `for` parameter, the node making the request to the proxy.
    #[must_use]
    pub fn with_for(mut self, node: impl Into<ForwardedNode>) -> Self {
        self.for_node = Some(node.into());
        self
    }

    /// Set the `by` parameter, the interface where the request came in.
    #[must_use]
    pub fn with_by(mut self, node: impl Into<ForwardedNode>) -> Self {
        self.by_node = Some(node.into());
        self
    }

    /// Set the `host` parameter, the original `Host` request header.
    pub fn with_host(mut self, host: &str) -> Result<Self, OpaqueError> {
        self.host = Some(parse_authority(host).context("parse forwarded host")?);
        Ok(self)
    }

    /// Set the `proto` parameter, the original URI scheme.
    pub fn with_proto(mut self, proto: &str) -> Result<Self, OpaqueError> {
        let mut bytes = proto.bytes();
        let valid = bytes.next().is_some_and(|b| b.is_ascii_alphabetic())
            && bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'));
        if !valid {
            return Err(OpaqueError::from_display(format!(
                "invalid forwarded proto {proto:?}"
            )));
        }
        self.proto = Some(proto.to_owned());
        Ok(self)
    }

    /// The `for` node.
    #[must_use]
    pub fn for_node(&self) -> Option<&ForwardedNode> {
        self.for_node.as_ref()
    }

    /// The `by` node.
    #[must_use]
    pub fn by_node(&self) -> Option<&ForwardedNode> {
        self.by_node.as_ref()
    }

    /// The `host` parameter.
    #[must_use]
    pub fn host(&self) -> Option<&Authority> {
        self.host.as_ref()
    }

    /// The `proto` parameter.
    #[must_use]
    pub fn proto(&self) -> Option<&str> {
        self.proto.as_deref()
    }

    /// The value of an extension parameter, name matched case-insensitively.
    #[must_use]
    pub fn extension(&self, name: &str) -> Option<&str> {
        self.extensions
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn parse(s: &str) -> Result<Self, OpaqueError> {
        let mut element = Self::empty();
        let mut seen: Vec<String> = Vec::new();

        for pair in csv::split_str(s, ';').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, value) = split_param(pair);
            if !is_token(name) {
                return Err(OpaqueError::from_display("forwarded parameter must be a token"));
            }
            let name = name.to_ascii_lowercase();
            if seen.contains(&name) {
                return Err(OpaqueError::from_display(format!(
                    "duplicate forwarded parameter {name}"
                )));
            }
            let value = token_or_quoted(value.context("forwarded pair without value")?)?;

            match name.as_str() {
                "for" => element.for_node = Some(value.parse()?),
                "by" => element.by_node = Some(value.parse()?),
                "host" => element = element.with_host(&value)?,
                "proto" => element = element.with_proto(&value)?,
                _ => element.extensions.push((name.clone(), value)),
            }
            seen.push(name);
        }

        if element.is_empty() {
            return Err(OpaqueError::from_display(
                "forwarded element without parameters",
            ));
        }
        Ok(element)
    }
}

impl fmt::Display for ForwardedElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";
        let mut pair = |f: &mut fmt::Formatter<'_>, name: &str, value: &str| {
            let result = write!(f, "{separator}{name}={}", quote_if_needed(value));
            separator = ";";
            result
        };

        if let Some(node) = &self.for_node {
            pair(f, "for", &node.to_string())?;
        }
        if let Some(node) = &self.by_node {
            pair(f, "by", &node.to_string())?;
        }
        if let Some(host) = &self.host {
            pair(f, "host", host.as_str())?;
        }
        if let Some(proto) = &self.proto {
            pair(f, "proto", proto)?;
        }
        for (name, value) in &self.extensions {
            pair(f, name, value)?;
        }
        Ok(())
    }
}

/// A `node` of a `for` or `by` parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ForwardedNode {
    name: NodeName,
    port: Option<NodePort>,
}

/// The identifier part of a [`ForwardedNode`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeName {
    /// An IPv4 or IPv6 address.
    Ip(IpAddr),
    /// `unknown`, the proxy does not know or disclose the node.
    Unknown,
    /// An obfuscated identifier, starting with `_`.
    Obfuscated(String),
}

/// The port part of a [`ForwardedNode`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodePort {
    /// A real port.
    Port(u16),
    /// An obfuscated port, starting with `_`.
    Obfuscated(String),
}

impl ForwardedNode {
    /// `unknown`
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            name: NodeName::Unknown,
            port: None,
        }
    }

    /// The node identifier.
    #[must_use]
    pub fn name(&self) -> &NodeName {
        &self.name
    }

    /// The IP address, if the node is not hidden.
    #[must_use]
    pub fn ip(&self) -> Option<IpAddr> {
        match self.name {
            NodeName::Ip(ip) => Some(ip),
            NodeName::Unknown | NodeName::Obfuscated(_) => None,
        }
    }

    /// The real port, if given.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        match self.port {
            Some(NodePort::Port(port)) => Some(port),
            Some(NodePort::Obfuscated(_)) | None => None,
        }
    }
}

impl From<IpAddr> for ForwardedNode {
    fn from(ip: IpAddr) -> Self {
        Self {
            name: NodeName::Ip(ip),
            port: None,
        }
    }
}

impl From<SocketAddr> for ForwardedNode {
    fn from(addr: SocketAddr) -> Self {
        Self {
            name: NodeName::Ip(addr.ip()),
            port: Some(NodePort::Port(addr.port())),
        }
    }
}

fn parse_obfuscated(s: &str) -> Option<String> {
    let rest = s.strip_prefix('_')?;
    let valid = !rest.is_empty()
        && rest
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'));
    valid.then(|| s.to_owned())
}

impl FromStr for ForwardedNode {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, port) = if let Some(rest) = s.strip_prefix('[') {
            let (ip, after) = rest.split_once(']').context("unterminated ipv6 node")?;
            let ip: Ipv6Addr = ip.parse().context("parse ipv6 node")?;
            let port = match after {
                "" => None,
                after => Some(after.strip_prefix(':').context("garbage after ipv6 node")?),
            };
            (NodeName::Ip(IpAddr::V6(ip)), port)
        } else {
            let (name, port) = match s.split_once(':') {
                Some((name, port)) => (name, Some(port)),
                None => (s, None),
            };
            let name = if name.eq_ignore_ascii_case("unknown") {
                NodeName::Unknown
            } else if let Some(obfuscated) = parse_obfuscated(name) {
                NodeName::Obfuscated(obfuscated)
            } else {
                let ip: Ipv4Addr = name.parse().context("parse ipv4 node")?;
                NodeName::Ip(IpAddr::V4(ip))
            };
            (name, port)
        };

        let port = port
            .map(|port| match parse_obfuscated(port) {
                Some(obfuscated) => Ok(NodePort::Obfuscated(obfuscated)),
                None if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => port
                    .parse()
                    .map(NodePort::Port)
                    .context("node port out of range"),
                None => Err(OpaqueError::from_display("invalid node port")),
            })
            .transpose()?;

        Ok(Self { name, port })
    }
}

impl fmt::Display for ForwardedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            NodeName::Ip(IpAddr::V4(ip)) => write!(f, "{ip}")?,
            NodeName::Ip(IpAddr::V6(ip)) => write!(f, "[{ip}]")?,
            NodeName::Unknown => f.write_str("unknown")?,
            NodeName::Obfuscated(name) => f.write_str(name)?,
        }
        match &self.port {
            Some(NodePort::Port(port)) => write!(f, ":{port}"),
            Some(NodePort::Obfuscated(port)) => write!(f, ":{port}"),
            None => Ok(()),
        }
    }
}
