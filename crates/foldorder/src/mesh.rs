//! Half-edge topology of a folded model.
//!
//! Faces and half-edges live in index arenas. A face's index is its identity
//! for the whole estimation run; the relation matrix and every derived
//! condition refer to faces by that index, so the mesh is immutable once built.
//! Each half-edge knows its face, the next half-edge of the face cycle and,
//! across a crease, its twin on the neighbouring face.

use crate::error::MeshError;

/// Index into [`FoldedMesh::halfedges`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfEdgeId(pub usize);

/// Crease assignment of a half-edge, relative to the paper's front side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Crease {
    /// Unpaired: the paper ends here.
    Boundary,
    Mountain,
    Valley,
    /// Paired but without a fold direction; seeds nothing.
    Flat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HalfEdge {
    pub face: usize,
    pub next: HalfEdgeId,
    pub pair: Option<HalfEdgeId>,
    pub crease: Crease,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub index: usize,
    pub first: HalfEdgeId,
    /// Front side of the paper faces up in the folded state.
    pub is_front: bool,
}

/// Immutable folded-model topology.
#[derive(Clone, Debug, Default)]
pub struct FoldedMesh {
    faces: Vec<Face>,
    halfedges: Vec<HalfEdge>,
}

impl FoldedMesh {
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face(&self, index: usize) -> &Face {
        &self.faces[index]
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn halfedges(&self) -> &[HalfEdge] {
        &self.halfedges
    }

    pub fn halfedge(&self, id: HalfEdgeId) -> &HalfEdge {
        &self.halfedges[id.0]
    }

    pub fn halfedge_count(&self) -> usize {
        self.halfedges.len()
    }

    /// Half-edges of `face` in cycle order, starting at `Face::first`.
    pub fn cycle(&self, face: usize) -> FaceCycle<'_> {
        let first = self.faces[face].first;
        FaceCycle {
            mesh: self,
            first,
            cur: Some(first),
        }
    }

    /// Index of the face across `he`, if `he` is a crease.
    pub fn pair_face(&self, he: HalfEdgeId) -> Option<usize> {
        self.halfedge(he).pair.map(|p| self.halfedge(p).face)
    }

    /// Number of crease pairs (each counted once).
    pub fn crease_count(&self) -> usize {
        self.halfedges.iter().filter(|h| h.pair.is_some()).count() / 2
    }
}

/// Iterator over one face cycle.
pub struct FaceCycle<'a> {
    mesh: &'a FoldedMesh,
    first: HalfEdgeId,
    cur: Option<HalfEdgeId>,
}

impl Iterator for FaceCycle<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cur?;
        let next = self.mesh.halfedge(id).next;
        self.cur = (next != self.first).then_some(next);
        Some(id)
    }
}

/// Incremental construction of a [`FoldedMesh`].
#[derive(Debug, Default)]
pub struct MeshBuilder {
    mesh: FoldedMesh,
}

impl MeshBuilder {
    pub const MIN_FACE_EDGES: usize = 3;

    pub fn new() -> Self {
        Self::default()
    }

    /// Append a face with a fresh cycle of `edge_count` boundary half-edges.
    /// Returns the face index.
    pub fn add_face(&mut self, edge_count: usize, is_front: bool) -> Result<usize, MeshError> {
        let index = self.mesh.faces.len();
        if edge_count < Self::MIN_FACE_EDGES {
            return Err(MeshError::DegenerateFace {
                face: index,
                min: Self::MIN_FACE_EDGES,
                got: edge_count,
            });
        }
        let base = self.mesh.halfedges.len();
        self.mesh.halfedges.extend((0..edge_count).map(|k| HalfEdge {
            face: index,
            next: HalfEdgeId(base + (k + 1) % edge_count),
            pair: None,
            crease: Crease::Boundary,
        }));
        self.mesh.faces.push(Face {
            index,
            first: HalfEdgeId(base),
            is_front,
        });
        Ok(index)
    }

    /// The `k`-th half-edge of `face`'s cycle, if both exist.
    pub fn halfedge_of(&self, face: usize, k: usize) -> Option<HalfEdgeId> {
        if face >= self.mesh.faces.len() {
            return None;
        }
        self.mesh.cycle(face).nth(k)
    }

    /// Pair two half-edges of different faces across a crease.
    pub fn connect(
        &mut self,
        a: HalfEdgeId,
        b: HalfEdgeId,
        crease: Crease,
    ) -> Result<(), MeshError> {
        if crease == Crease::Boundary {
            return Err(MeshError::BoundaryCrease);
        }
        for id in [a, b] {
            let he = self
                .mesh
                .halfedges
                .get(id.0)
                .ok_or(MeshError::UnknownHalfEdge { id: id.0 })?;
            if he.pair.is_some() {
                return Err(MeshError::AlreadyPaired { id: id.0 });
            }
        }
        let face = self.mesh.halfedges[a.0].face;
        if face == self.mesh.halfedges[b.0].face {
            return Err(MeshError::SameFace { a: a.0, b: b.0, face });
        }
        for (from, to) in [(a, b), (b, a)] {
            let he = &mut self.mesh.halfedges[from.0];
            he.pair = Some(to);
            he.crease = crease;
        }
        Ok(())
    }

    pub fn build(self) -> FoldedMesh {
        self.mesh
    }
}
