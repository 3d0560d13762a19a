// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed collections built from raw child node lists.

use super::{
    ReportKind,
    extension::ExtensionData,
    factory::{NodeRole, ReportNodeFactory},
    reconcile::ReconcileScope,
};
use crate::{
    errors::{DisplayErrorChain, KindMismatch},
    raw::RawNode,
};
use camino::Utf8Path;
use tracing::{debug, trace, warn};

/// State shared by every node parsed during one attempt at building a report kind.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ParseContext<'a> {
    factory: &'a dyn ReportNodeFactory,
    base_dir: &'a Utf8Path,
}

impl<'a> ParseContext<'a> {
    pub(crate) fn new(factory: &'a dyn ReportNodeFactory, base_dir: &'a Utf8Path) -> Self {
        Self { factory, base_dir }
    }

    pub(crate) fn kind(&self) -> ReportKind {
        self.factory.kind()
    }

    pub(crate) fn scope(&self) -> ReconcileScope {
        self.factory.reconcile_scope()
    }

    pub(crate) fn role_of(&self, node: &RawNode, parent: &RawNode) -> Option<NodeRole> {
        self.factory.role_of(node, parent)
    }

    /// Loads the extension data referenced by `raw`, if any.
    ///
    /// Unavailable extension data is logged and treated as absent.
    pub(crate) fn load_extension(&self, raw: &RawNode) -> Option<ExtensionData> {
        let relative = raw.data().extension_file()?;
        // Reports written on Windows use backslashes.
        let path = self.base_dir.join(relative.replace('\\', "/"));
        match ExtensionData::load(&path) {
            Ok(data) => Some(data),
            Err(err) if err.is_not_found() => {
                debug!("{}", DisplayErrorChain::new(&err));
                None
            }
            Err(err) => {
                warn!("{}", DisplayErrorChain::new(&err));
                None
            }
        }
    }
}

/// A typed report node that can be built from a raw node.
pub(crate) trait TypedNode: Sized {
    /// Returns true if nodes of this type are built from nodes with the given role.
    fn accepts(role: NodeRole) -> bool;

    /// Builds this node from `raw`, which the factory assigned `role`.
    fn parse(raw: &RawNode, role: NodeRole, cx: &ParseContext<'_>) -> Result<Self, KindMismatch>;
}

/// The typed nodes built from one raw parent's children, in document order.
#[derive(Debug)]
pub(crate) struct ReportNodeCollection<T> {
    nodes: Vec<T>,
}

impl<T: TypedNode> ReportNodeCollection<T> {
    /// Builds every child of `parent` that the factory maps to a role `T` accepts.
    ///
    /// Other children are skipped. A structural mismatch anywhere below aborts the whole
    /// collection.
    pub(crate) fn collect(parent: &RawNode, cx: &ParseContext<'_>) -> Result<Self, KindMismatch> {
        let mut nodes = Vec::new();
        for child in parent.children() {
            match cx.role_of(child, parent) {
                Some(role) if T::accepts(role) => nodes.push(T::parse(child, role, cx)?),
                role => {
                    trace!(
                        "{}: skipping `{}` node under `{}` (role: {:?})",
                        cx.kind(),
                        child.node_type(),
                        parent.node_type(),
                        role,
                    );
                }
            }
        }
        Ok(Self { nodes })
    }

    pub(crate) fn into_vec(self) -> Vec<T> {
        self.nodes
    }
}
