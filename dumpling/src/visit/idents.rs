//! Parseable identifier types: UUIDs, URLs, versions, network addresses,
//! and reflective type handles.
//!
//! Everything here has a canonical string form and a well-known parse entry
//! point in every target language, so it emits as a parse call instead of a
//! member-by-member object. Type handles are the one exception: they emit
//! through the writer's type-of construct.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};

use semver::Version;
use url::Url;
use uuid::Uuid;

use super::{KnownTypeVisitor, VisitScope};
use crate::descriptor::TypeDescriptor;
use crate::inspector::TypeSchema;
use crate::options::IntegerFormat;
use crate::reflect::Reflect;
use crate::writer::{Callee, Literal, emit};

/// Renders identifier-like values as parse calls.
pub struct KnownIdentsVisitor;

impl KnownTypeVisitor for KnownIdentsVisitor {
    fn is_suitable_for(&self, value: &dyn Reflect, _schema: Option<&TypeSchema>) -> bool {
        canonical_text(value).is_some() || value.is::<TypeDescriptor>()
    }

    fn visit(&self, scope: &mut VisitScope<'_, '_>) {
        if let Some(handle) = scope.value.downcast_ref::<TypeDescriptor>() {
            scope.writer.type_of(handle);
            return;
        }
        let Some(text) = canonical_text(scope.value) else {
            return;
        };

        let ty = TypeDescriptor::parse(scope.value.type_path());
        let arg = emit(move |w| w.literal(&Literal::Str(text), &IntegerFormat::default()));
        scope
            .writer
            .method_invoke(Callee::Static { ty: &ty, method: "parse" }, vec![arg]);
    }
}

fn canonical_text(value: &dyn Reflect) -> Option<String> {
    if let Some(id) = value.downcast_ref::<Uuid>() {
        return Some(id.to_string());
    }
    if let Some(url) = value.downcast_ref::<Url>() {
        return Some(url.to_string());
    }
    if let Some(version) = value.downcast_ref::<Version>() {
        return Some(version.to_string());
    }
    if let Some(addr) = value.downcast_ref::<IpAddr>() {
        return Some(addr.to_string());
    }
    if let Some(addr) = value.downcast_ref::<Ipv4Addr>() {
        return Some(addr.to_string());
    }
    if let Some(addr) = value.downcast_ref::<Ipv6Addr>() {
        return Some(addr.to_string());
    }
    if let Some(addr) = value.downcast_ref::<SocketAddr>() {
        return Some(addr.to_string());
    }
    if let Some(addr) = value.downcast_ref::<SocketAddrV4>() {
        return Some(addr.to_string());
    }
    if let Some(addr) = value.downcast_ref::<SocketAddrV6>() {
        return Some(addr.to_string());
    }
    None
}
