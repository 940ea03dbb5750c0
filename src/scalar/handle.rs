use std::fmt::Debug;

use log::warn;

use crate::datatypes::GeometryType;
use crate::engine::{Context, Engine, Handle, NativeGeometry};
use crate::error::{GeoHandleError, Result, SetError};
use crate::scalar::Geometry;
use crate::trait_::private::Sealed;

/// A wrapper's reference to one engine allocation.
///
/// An owned handle releases its allocation, and everything below it, when dropped. A
/// non-owned handle is an alias of a member of some other geometry: it never releases
/// anything, and fails with [GeoHandleError::Lifetime] once the member is gone.
pub struct GeomHandle {
    ctx: Context,
    handle: Handle,
    owned: bool,
}

impl GeomHandle {
    pub(crate) fn owned(ctx: Context, handle: Handle) -> Self {
        Self {
            ctx,
            handle,
            owned: true,
        }
    }

    pub(crate) fn alias(ctx: Context, handle: Handle) -> Self {
        Self {
            ctx,
            handle,
            owned: false,
        }
    }

    /// Insert `geom` into the current thread's engine.
    pub(crate) fn create(geom: &NativeGeometry, srid: Option<i32>) -> Result<Self> {
        let ctx = Context::current();
        let handle = ctx.write(|engine| engine.create(geom, srid))?;
        Ok(Self::owned(ctx, handle))
    }

    /// Create a `geom_type` adopting `children` as its members.
    ///
    /// Aliases are copied first so no allocation ends up with two parents. On error every
    /// child is dropped normally, releasing what it owned.
    pub(crate) fn compose(
        geom_type: GeometryType,
        children: Vec<GeomHandle>,
        srid: Option<i32>,
    ) -> Result<Self> {
        let ctx = Context::current();
        let children = children
            .into_iter()
            .map(GeomHandle::into_owned)
            .collect::<Result<Vec<_>>>()?;
        let handles = children.iter().map(|c| c.handle).collect();
        let handle = ctx.write(|engine| engine.compose(geom_type, handles, srid))?;
        children.into_iter().for_each(GeomHandle::disown);
        Ok(Self::owned(ctx, handle))
    }

    pub(crate) fn read<T>(&self, f: impl FnOnce(&Engine, Handle) -> Result<T>) -> Result<T> {
        self.ctx.read(|engine| f(engine, self.handle))
    }

    /// Run a mutating engine call on this handle.
    ///
    /// Aliases share the allocation of their owner, so this only needs `&self`.
    pub(crate) fn write<T>(&self, f: impl FnOnce(&mut Engine, Handle) -> Result<T>) -> Result<T> {
        self.ctx.write(|engine| f(engine, self.handle))
    }

    /// Wrap a handle the engine just derived from this one.
    pub(crate) fn derive(&self, f: impl FnOnce(&mut Engine, Handle) -> Result<Handle>) -> Result<Self> {
        let handle = self.write(f)?;
        Ok(Self::owned(self.ctx.clone(), handle))
    }

    /// Wrap the `i`-th member of this geometry as an alias.
    pub(crate) fn member(&self, i: usize) -> Result<Self> {
        let handle = self.write(|engine, h| engine.child(h, i))?;
        Ok(Self::alias(self.ctx.clone(), handle))
    }

    /// Put `new` into slot `i`, releasing the previous member.
    ///
    /// On failure `new` is handed back unchanged inside the [SetError].
    pub(crate) fn replace_member(&self, i: usize, new: Geometry) -> Result<(), SetError> {
        match self.adopt_into_slot(i, new.geom_handle()) {
            Ok(Some(copy)) => {
                copy.disown();
                Ok(())
            }
            Ok(None) => {
                new.into_handle().disown();
                Ok(())
            }
            Err(error) => Err(SetError { error, value: new }),
        }
    }

    /// Link `new`, or a copy of it when it is an alias, into slot `i`. Returns the copy.
    fn adopt_into_slot(&self, i: usize, new: &GeomHandle) -> Result<Option<GeomHandle>> {
        let len = self.read(|engine, h| engine.num_members(h))?;
        if i >= len {
            return Err(GeoHandleError::index(i, len));
        }
        let copy = if new.owned {
            None
        } else {
            Some(new.try_clone()?)
        };
        let handle = copy.as_ref().map_or(new.handle, |c| c.handle);
        self.write(|engine, h| engine.replace_child(h, i, handle))?;
        Ok(copy)
    }

    /// A second, non-owning reference to the same allocation.
    pub(crate) fn share(&self) -> Self {
        Self::alias(self.ctx.clone(), self.handle)
    }

    pub(crate) fn handle(&self) -> Handle {
        self.handle
    }

    pub fn is_owned(&self) -> bool {
        self.owned
    }

    /// Whether the allocation is still live.
    pub fn is_alive(&self) -> bool {
        self.read(|engine, h| engine.geometry_type(h)).is_ok()
    }

    /// A new owned copy of the allocation.
    pub fn try_clone(&self) -> Result<Self> {
        self.derive(|engine, h| engine.clone_geom(h))
    }

    fn into_owned(self) -> Result<Self> {
        if self.owned {
            Ok(self)
        } else {
            self.try_clone()
        }
    }

    /// Hand the allocation over to a parent node.
    fn disown(mut self) {
        self.owned = false;
    }
}

impl Drop for GeomHandle {
    fn drop(&mut self) {
        if !self.owned {
            return;
        }
        if let Err(err) = self.ctx.write(|engine| engine.release(self.handle)) {
            warn!("leaking geometry {}: {err}", self.handle);
        }
    }
}

impl Debug for GeomHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeomHandle")
            .field("handle", &self.handle)
            .field("owned", &self.owned)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord::Coord;
    use crate::engine::live_handles;

    fn point(x: f64, y: f64) -> GeomHandle {
        GeomHandle::create(&NativeGeometry::point(Coord::xy(x, y)), None).unwrap()
    }

    #[test]
    fn owned_handles_release_on_drop() {
        let before = live_handles().unwrap();
        let a = point(0., 0.);
        assert!(a.is_owned());
        assert_eq!(live_handles().unwrap(), before + 1);
        drop(a);
        assert_eq!(live_handles().unwrap(), before);
    }

    #[test]
    fn adopted_children_are_released_with_parent() {
        let before = live_handles().unwrap();
        let multi = GeomHandle::compose(
            GeometryType::MultiPoint,
            vec![point(0., 0.), point(1., 1.)],
            None,
        )
        .unwrap();
        assert_eq!(live_handles().unwrap(), before + 3);

        let member = multi.member(1).unwrap();
        assert!(!member.is_owned());
        drop(multi);
        assert!(!member.is_alive());
        drop(member);
        assert_eq!(live_handles().unwrap(), before);
    }

    #[test]
    fn aliases_are_copied_on_adoption() {
        let multi =
            GeomHandle::compose(GeometryType::MultiPoint, vec![point(0., 0.)], None).unwrap();
        let alias = multi.member(0).unwrap();
        let other = GeomHandle::compose(GeometryType::MultiPoint, vec![alias], None).unwrap();
        assert_ne!(
            multi.member(0).unwrap().handle(),
            other.member(0).unwrap().handle()
        );
    }

    #[test]
    fn failed_composition_releases_children() {
        let before = live_handles().unwrap();
        let err = GeomHandle::compose(GeometryType::Polygon, vec![point(0., 0.)], None);
        assert!(matches!(err, Err(GeoHandleError::Type(_))));
        assert_eq!(live_handles().unwrap(), before);
    }
}
