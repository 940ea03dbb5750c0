//! The handle-based geometry engine.
//!
//! An [Engine] owns every geometry allocation of a thread as nodes of a generational
//! [arena](arena::Arena). Callers only ever hold [Handle]s. Rendering and algorithms work on
//! a detached [NativeGeometry] exported from the arena, and derived geometries are inserted
//! back as new root nodes.
//!
//! Wrappers reach the engine of their thread through a [Context].

use std::cell::RefCell;
use std::rc::Rc;

use itertools::Itertools;
use log::{debug, trace};

use crate::algorithm::geo::{
    Area, Boundary, Buffer, Centroid, ConvexHull, Envelope, EuclideanLength, Overlay, OverlayOp,
    Predicate, Relate, RelateMatrix, Validity,
};
use crate::coord::{Coord, CoordBuffer};
use crate::datatypes::{Dimension, GeometryType};
use crate::error::{GeoHandleError, Result};
use crate::io::geojson::write_geojson;
use crate::io::kml::write_kml;
use crate::io::wkb::{to_hex, wkb_size, write_wkb, WkbFlavor};
use crate::io::wkt::{write_ewkt, write_wkt};

use arena::{Arena, Node, Payload};

pub use arena::Handle;
pub use native::NativeGeometry;
pub use options::EngineOptions;

pub mod arena;
mod native;
mod options;

/// One thread's geometry store and the operations on it.
///
/// Every method checks the liveness of the handles it is given first and fails with
/// [GeoHandleError::Lifetime] on a released or overwritten one.
#[derive(Debug, Default)]
pub struct Engine {
    arena: Arena,
    options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            arena: Arena::new(),
            options,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: EngineOptions) {
        self.options = options;
    }

    /// Number of allocated nodes, counting every ring and member.
    pub fn live_handles(&self) -> usize {
        self.arena.live()
    }

    /// Insert a detached geometry as a new root.
    pub fn create(&mut self, geom: &NativeGeometry, srid: Option<i32>) -> Result<Handle> {
        trace!("create {}", geom.geometry_type());
        self.insert_tree(geom, srid, None)
    }

    fn insert_tree(
        &mut self,
        geom: &NativeGeometry,
        srid: Option<i32>,
        parent: Option<Handle>,
    ) -> Result<Handle> {
        let mut node = Node {
            geom_type: geom.geometry_type(),
            srid,
            dim: geom.dim(),
            parent,
            payload: Payload::Children(vec![]),
        };
        match geom {
            NativeGeometry::Point(c)
            | NativeGeometry::LineString(c)
            | NativeGeometry::LinearRing(c) => {
                node.payload = Payload::Coords(c.clone());
                Ok(self.arena.insert(node))
            }
            NativeGeometry::Polygon(rings) => {
                let handle = self.arena.insert(node);
                let children = rings
                    .iter()
                    .map(|ring| {
                        self.arena.insert(Node {
                            geom_type: GeometryType::LinearRing,
                            srid,
                            dim: ring.dim(),
                            parent: Some(handle),
                            payload: Payload::Coords(ring.clone()),
                        })
                    })
                    .collect();
                self.arena.get_mut(handle)?.payload = Payload::Children(children);
                Ok(handle)
            }
            NativeGeometry::MultiPoint(parts)
            | NativeGeometry::MultiLineString(parts)
            | NativeGeometry::MultiPolygon(parts)
            | NativeGeometry::GeometryCollection(parts) => {
                let handle = self.arena.insert(node);
                let children = parts
                    .iter()
                    .map(|part| self.insert_tree(part, srid, Some(handle)))
                    .collect::<Result<Vec<_>>>()?;
                self.arena.get_mut(handle)?.payload = Payload::Children(children);
                Ok(handle)
            }
        }
    }

    /// Create a geometry of `geom_type` adopting the root nodes `children` as its members.
    ///
    /// Every child must be a live root accepted by `geom_type`, and the non-empty children
    /// must share one coordinate dimension. Nothing is modified when a check fails.
    /// Adopted children take `srid`; rings adopted by a MultiLineString become line strings.
    pub fn compose(
        &mut self,
        geom_type: GeometryType,
        children: Vec<Handle>,
        srid: Option<i32>,
    ) -> Result<Handle> {
        if !geom_type.is_collection() && geom_type != GeometryType::Polygon {
            return Err(GeoHandleError::Type(format!(
                "a {geom_type} cannot be composed from members"
            )));
        }
        if !children.iter().all_unique() {
            return Err(GeoHandleError::Engine(
                "the same handle was given twice".to_string(),
            ));
        }
        for child in &children {
            let node = self.arena.get(*child)?;
            if let Some(parent) = node.parent {
                return Err(GeoHandleError::Engine(format!(
                    "{child} is already a member of {parent}"
                )));
            }
            check_member(geom_type, node.geom_type)?;
        }
        let dim = self.common_dim(children.iter().copied())?;
        trace!("compose {geom_type} from {} members", children.len());

        let handle = self.arena.insert(Node {
            geom_type,
            srid,
            dim,
            parent: None,
            payload: Payload::Children(children.clone()),
        });
        for child in children {
            self.link(handle, geom_type, child)?;
        }
        self.propagate_srid(handle, srid)?;
        Ok(handle)
    }

    fn link(&mut self, parent: Handle, parent_type: GeometryType, child: Handle) -> Result<()> {
        let node = self.arena.get_mut(child)?;
        node.parent = Some(parent);
        if parent_type == GeometryType::MultiLineString && node.geom_type == GeometryType::LinearRing
        {
            node.geom_type = GeometryType::LineString;
        }
        Ok(())
    }

    /// The dimension shared by the non-empty geometries among `handles`.
    fn common_dim(&self, handles: impl Iterator<Item = Handle>) -> Result<Dimension> {
        let mut dim = None;
        for handle in handles {
            if self.is_empty(handle)? {
                continue;
            }
            let child_dim = self.arena.get(handle)?.dim;
            match dim {
                None => dim = Some(child_dim),
                Some(d) if d != child_dim => {
                    return Err(GeoHandleError::Type(
                        "cannot mix 2D and 3D members".to_string(),
                    ))
                }
                Some(_) => {}
            }
        }
        Ok(dim.unwrap_or_default())
    }

    /// Copy the tree below `handle` out of the arena.
    pub fn export(&self, handle: Handle) -> Result<NativeGeometry> {
        let node = self.arena.get(handle)?;
        Ok(match node.geom_type {
            GeometryType::Point => NativeGeometry::Point(coords_of(node)?.clone()),
            GeometryType::LineString => NativeGeometry::LineString(coords_of(node)?.clone()),
            GeometryType::LinearRing => NativeGeometry::LinearRing(coords_of(node)?.clone()),
            GeometryType::Polygon => NativeGeometry::Polygon(
                node.children()
                    .iter()
                    .map(|ring| Ok(coords_of(self.arena.get(*ring)?)?.clone()))
                    .collect::<Result<_>>()?,
            ),
            GeometryType::MultiPoint => NativeGeometry::MultiPoint(self.export_children(node)?),
            GeometryType::MultiLineString => {
                NativeGeometry::MultiLineString(self.export_children(node)?)
            }
            GeometryType::MultiPolygon => {
                NativeGeometry::MultiPolygon(self.export_children(node)?)
            }
            GeometryType::GeometryCollection => {
                NativeGeometry::GeometryCollection(self.export_children(node)?)
            }
        })
    }

    fn export_children(&self, node: &Node) -> Result<Vec<NativeGeometry>> {
        node.children().iter().map(|h| self.export(*h)).collect()
    }

    /// Deep copy `handle` into a new root with the same SRID.
    pub fn clone_geom(&mut self, handle: Handle) -> Result<Handle> {
        let geom = self.export(handle)?;
        let srid = self.srid(handle)?;
        self.create(&geom, srid)
    }

    /// Free a root and everything below it, returning the number of nodes freed.
    pub fn release(&mut self, handle: Handle) -> Result<usize> {
        if let Some(parent) = self.arena.get(handle)?.parent {
            return Err(GeoHandleError::Engine(format!(
                "{handle} is a member of {parent} and cannot be released on its own"
            )));
        }
        let freed = self.arena.remove_tree(handle)?;
        debug!("released {handle}, {freed} nodes freed");
        Ok(freed)
    }

    pub fn geometry_type(&self, handle: Handle) -> Result<GeometryType> {
        Ok(self.arena.get(handle)?.geom_type)
    }

    pub fn dim(&self, handle: Handle) -> Result<Dimension> {
        Ok(self.arena.get(handle)?.dim)
    }

    pub fn srid(&self, handle: Handle) -> Result<Option<i32>> {
        Ok(self.arena.get(handle)?.srid)
    }

    pub fn parent(&self, handle: Handle) -> Result<Option<Handle>> {
        Ok(self.arena.get(handle)?.parent)
    }

    /// Set the SRID of `handle` and every node below it.
    pub fn set_srid(&mut self, handle: Handle, srid: Option<i32>) -> Result<()> {
        self.propagate_srid(handle, srid)
    }

    fn propagate_srid(&mut self, handle: Handle, srid: Option<i32>) -> Result<()> {
        let mut pending = vec![handle];
        while let Some(next) = pending.pop() {
            let node = self.arena.get_mut(next)?;
            node.srid = srid;
            pending.extend_from_slice(node.children());
        }
        Ok(())
    }

    /// Coordinates of a curve or point, members of a polygon or collection.
    pub fn len(&self, handle: Handle) -> Result<usize> {
        Ok(match &self.arena.get(handle)?.payload {
            Payload::Coords(c) => c.len(),
            Payload::Children(children) => children.len(),
        })
    }

    /// Rings of a polygon or members of a collection. Points and curves fail with
    /// [GeoHandleError::Type].
    pub fn num_members(&self, handle: Handle) -> Result<usize> {
        Ok(members_of(self.arena.get(handle)?)?.len())
    }

    /// The `i`-th member of a polygon or collection.
    ///
    /// The member takes the SRID of its parent.
    pub fn child(&mut self, handle: Handle, i: usize) -> Result<Handle> {
        let node = self.arena.get(handle)?;
        let child = *members_of(node)?
            .get(i)
            .ok_or_else(|| GeoHandleError::index(i, node.children().len()))?;
        let srid = node.srid;
        self.propagate_srid(child, srid)?;
        Ok(child)
    }

    /// Replace the `i`-th member of `handle` with the root `new`.
    ///
    /// The index is checked first, then the member type and dimension. On success the old
    /// member's subtree is freed, so handles into it fail with [GeoHandleError::Lifetime].
    pub fn replace_child(&mut self, handle: Handle, i: usize, new: Handle) -> Result<()> {
        let node = self.arena.get(handle)?;
        let parent_type = node.geom_type;
        let srid = node.srid;
        let members = members_of(node)?.to_vec();
        let old = *members
            .get(i)
            .ok_or_else(|| GeoHandleError::index(i, members.len()))?;

        let new_node = self.arena.get(new)?;
        if let Some(parent) = new_node.parent {
            return Err(GeoHandleError::Engine(format!(
                "{new} is already a member of {parent}"
            )));
        }
        check_member(parent_type, new_node.geom_type)?;
        if self.ancestors(handle)?.contains(&new) || new == handle {
            return Err(GeoHandleError::Engine(format!(
                "{new} cannot become a member of its own descendant"
            )));
        }
        let dim = self.common_dim(
            members
                .iter()
                .enumerate()
                .map(|(j, h)| if j == i { new } else { *h }),
        )?;

        let freed = self.arena.remove_tree(old)?;
        debug!("slot {i} of {handle} overwritten, {freed} nodes invalidated");
        let node = self.arena.get_mut(handle)?;
        node.dim = dim;
        if let Payload::Children(children) = &mut node.payload {
            children[i] = new;
        }
        self.link(handle, parent_type, new)?;
        self.propagate_srid(new, srid)
    }

    fn ancestors(&self, handle: Handle) -> Result<Vec<Handle>> {
        let mut out = vec![];
        let mut current = self.arena.get(handle)?.parent;
        while let Some(parent) = current {
            out.push(parent);
            current = self.arena.get(parent)?.parent;
        }
        Ok(out)
    }

    /// A copy of the coordinate sequence of a point or curve.
    pub fn coords(&self, handle: Handle) -> Result<CoordBuffer> {
        Ok(coords_of(self.arena.get(handle)?)?.clone())
    }

    pub fn coord(&self, handle: Handle, i: usize) -> Result<Coord> {
        let coords = coords_of(self.arena.get(handle)?)?;
        coords
            .get(i)
            .ok_or_else(|| GeoHandleError::index(i, coords.len()))
    }

    /// Overwrite coordinate `i` in place. The coordinate must match the sequence dimension.
    pub fn set_coord(&mut self, handle: Handle, i: usize, coord: Coord) -> Result<()> {
        coords_of_mut(self.arena.get_mut(handle)?)?.set(i, coord)
    }

    pub fn set_ordinate(
        &mut self,
        handle: Handle,
        i: usize,
        ordinate: usize,
        value: f64,
    ) -> Result<()> {
        coords_of_mut(self.arena.get_mut(handle)?)?.set_ordinate(i, ordinate, value)
    }

    pub fn wkt(&self, handle: Handle) -> Result<String> {
        write_wkt(&self.export(handle)?)
    }

    pub fn ewkt(&self, handle: Handle) -> Result<String> {
        write_ewkt(&self.export(handle)?, self.srid(handle)?)
    }

    /// ISO WKB in the configured byte order.
    pub fn wkb(&self, handle: Handle) -> Result<Vec<u8>> {
        self.encode(handle, WkbFlavor::Iso)
    }

    /// EWKB in the configured byte order, carrying the SRID when one is set.
    pub fn ewkb(&self, handle: Handle) -> Result<Vec<u8>> {
        self.encode(handle, WkbFlavor::Extended)
    }

    fn encode(&self, handle: Handle, flavor: WkbFlavor) -> Result<Vec<u8>> {
        let geom = self.export(handle)?;
        let srid = self.srid(handle)?;
        let with_srid = flavor == WkbFlavor::Extended && srid.is_some();
        let mut buf = Vec::with_capacity(wkb_size(&geom, with_srid));
        write_wkb(&mut buf, &geom, self.options.wkb_byte_order, flavor, srid)?;
        Ok(buf)
    }

    pub fn hex(&self, handle: Handle) -> Result<String> {
        Ok(to_hex(&self.wkb(handle)?, self.options.hex_uppercase))
    }

    pub fn hexewkb(&self, handle: Handle) -> Result<String> {
        Ok(to_hex(&self.ewkb(handle)?, self.options.hex_uppercase))
    }

    pub fn kml(&self, handle: Handle) -> Result<String> {
        Ok(write_kml(&self.export(handle)?))
    }

    pub fn json(&self, handle: Handle) -> Result<String> {
        write_geojson(&self.export(handle)?)
    }

    pub fn relate(&self, a: Handle, b: Handle) -> Result<RelateMatrix> {
        Ok(self.export(a)?.relate(&self.export(b)?))
    }

    pub fn relate_pattern(&self, a: Handle, b: Handle, pattern: &str) -> Result<bool> {
        self.export(a)?.relate_pattern(&self.export(b)?, pattern)
    }

    pub fn predicate(&self, a: Handle, b: Handle, predicate: Predicate) -> Result<bool> {
        Ok(self.export(a)?.predicate(&self.export(b)?, predicate))
    }

    /// Topological equality of geometries with the same coordinate dimension.
    pub fn equals(&self, a: Handle, b: Handle) -> Result<bool> {
        Ok(self.dim(a)? == self.dim(b)? && self.predicate(a, b, Predicate::Equals)?)
    }

    pub fn equals_exact(&self, a: Handle, b: Handle, tolerance: f64) -> Result<bool> {
        Ok(self.export(a)?.equals_exact(&self.export(b)?, tolerance))
    }

    /// Overlay `a` with `b` into a new root carrying the SRID of `a`.
    pub fn overlay(&mut self, a: Handle, b: Handle, op: OverlayOp) -> Result<Handle> {
        let other = self.export(b)?;
        self.derive(a, |geom| geom.overlay(&other, op))
    }

    pub fn buffer(&mut self, handle: Handle, width: f64, quadsegs: i32) -> Result<Handle> {
        self.derive(handle, |geom| geom.buffer(width, quadsegs))
    }

    pub fn area(&self, handle: Handle) -> Result<f64> {
        Ok(self.export(handle)?.unsigned_area())
    }

    pub fn length(&self, handle: Handle) -> Result<f64> {
        Ok(self.export(handle)?.euclidean_length())
    }

    pub fn centroid(&mut self, handle: Handle) -> Result<Handle> {
        self.derive(handle, |geom| Ok(geom.centroid()))
    }

    pub fn envelope(&mut self, handle: Handle) -> Result<Handle> {
        self.derive(handle, |geom| Ok(geom.envelope()))
    }

    pub fn convex_hull(&mut self, handle: Handle) -> Result<Handle> {
        self.derive(handle, |geom| Ok(geom.convex_hull()))
    }

    pub fn boundary(&mut self, handle: Handle) -> Result<Handle> {
        self.derive(handle, |geom| geom.boundary())
    }

    pub fn is_valid(&self, handle: Handle) -> Result<bool> {
        Ok(self.export(handle)?.is_valid())
    }

    pub fn is_ring(&self, handle: Handle) -> Result<bool> {
        Ok(self.export(handle)?.is_ring())
    }

    pub fn is_empty(&self, handle: Handle) -> Result<bool> {
        let node = self.arena.get(handle)?;
        match &node.payload {
            Payload::Coords(c) => Ok(c.is_empty()),
            Payload::Children(children) if node.geom_type == GeometryType::Polygon => {
                match children.first() {
                    Some(shell) => self.is_empty(*shell),
                    None => Ok(true),
                }
            }
            Payload::Children(children) => {
                for child in children {
                    if !self.is_empty(*child)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }

    /// Run `f` on the geometry of `handle` and insert the result as a new root with the same
    /// SRID.
    fn derive(
        &mut self,
        handle: Handle,
        f: impl FnOnce(&NativeGeometry) -> Result<NativeGeometry>,
    ) -> Result<Handle> {
        let geom = self.export(handle)?;
        let srid = self.srid(handle)?;
        let result = f(&geom)?;
        self.create(&result, srid)
    }
}

fn check_member(parent: GeometryType, child: GeometryType) -> Result<()> {
    if parent.accepts_member(child) {
        Ok(())
    } else {
        Err(GeoHandleError::Type(format!(
            "a {parent} cannot hold a {child}"
        )))
    }
}

fn coords_of(node: &Node) -> Result<&CoordBuffer> {
    match &node.payload {
        Payload::Coords(c) => Ok(c),
        Payload::Children(_) => Err(GeoHandleError::Type(format!(
            "a {} has no coordinate sequence",
            node.geom_type
        ))),
    }
}

fn coords_of_mut(node: &mut Node) -> Result<&mut CoordBuffer> {
    let geom_type = node.geom_type;
    match &mut node.payload {
        Payload::Coords(c) => Ok(c),
        Payload::Children(_) => Err(GeoHandleError::Type(format!(
            "a {geom_type} has no coordinate sequence"
        ))),
    }
}

fn members_of(node: &Node) -> Result<&[Handle]> {
    match &node.payload {
        Payload::Children(children) => Ok(children),
        Payload::Coords(_) => Err(GeoHandleError::Type(format!(
            "a {} has no members",
            node.geom_type
        ))),
    }
}

thread_local! {
    static CONTEXT: Context = Context::default();
}

/// Shared access to the engine of the current thread.
///
/// Cloning a context shares the engine. Holding one makes a type `!Send` and `!Sync`.
#[derive(Debug, Clone, Default)]
pub struct Context(Rc<RefCell<Engine>>);

impl Context {
    /// The engine of the calling thread.
    pub fn current() -> Self {
        CONTEXT.with(|ctx| ctx.clone())
    }

    pub fn read<T>(&self, f: impl FnOnce(&Engine) -> Result<T>) -> Result<T> {
        let engine = self.0.try_borrow().map_err(|_| busy())?;
        f(&engine)
    }

    pub fn write<T>(&self, f: impl FnOnce(&mut Engine) -> Result<T>) -> Result<T> {
        let mut engine = self.0.try_borrow_mut().map_err(|_| busy())?;
        f(&mut engine)
    }
}

fn busy() -> GeoHandleError {
    GeoHandleError::Engine("the engine is already in use".to_string())
}

/// Install `options` on the current thread's engine.
pub fn configure(options: EngineOptions) -> Result<()> {
    Context::current().write(|engine| {
        engine.set_options(options);
        Ok(())
    })
}

/// The options of the current thread's engine.
pub fn options() -> Result<EngineOptions> {
    Context::current().read(|engine| Ok(engine.options().clone()))
}

/// Number of live nodes in the current thread's engine.
pub fn live_handles() -> Result<usize> {
    Context::current().read(|engine| Ok(engine.live_handles()))
}
