//! Vertex adjacency and edge tables built from welded triangles.

// Edge ids are u32 like vertex ids
#![allow(clippy::cast_possible_truncation)]

use hashbrown::HashMap;

/// Canonical edge key: `(min, max)` of the two vertex ids.
pub type EdgeKey = (u32, u32);

/// Normalize edge so smaller vertex index comes first.
#[inline]
#[must_use]
pub const fn normalize_edge(v0: u32, v1: u32) -> EdgeKey {
    if v0 <= v1 { (v0, v1) } else { (v1, v0) }
}

/// Insert into a sorted, duplicate-free list.
fn insert_sorted(list: &mut Vec<u32>, value: u32) {
    if let Err(pos) = list.binary_search(&value) {
        list.insert(pos, value);
    }
}

/// One undirected edge and the vertices facing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    /// Smaller endpoint id.
    pub a: u32,
    /// Larger endpoint id.
    pub b: u32,
    /// Third corners of every triangle containing the edge, ascending and
    /// without duplicates.
    pub opposite: Vec<u32>,
}

impl EdgeRecord {
    /// Canonical key of this edge.
    #[inline]
    #[must_use]
    pub const fn key(&self) -> EdgeKey {
        (self.a, self.b)
    }

    /// Fewer than two facing vertices: the edge borders a single triangle.
    #[inline]
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.opposite.len() < 2
    }

    /// More than two facing vertices.
    #[inline]
    #[must_use]
    pub fn is_non_manifold(&self) -> bool {
        self.opposite.len() > 2
    }

    /// The two facing vertices used by the interior edge stencil.
    ///
    /// Non-manifold edges contribute their two lowest ids.
    #[inline]
    #[must_use]
    pub fn wings(&self) -> Option<(u32, u32)> {
        match self.opposite.as_slice() {
            [c, d, ..] => Some((*c, *d)),
            _ => None,
        }
    }

    /// The endpoint that is not `v`.
    #[inline]
    #[must_use]
    pub const fn other(&self, v: u32) -> u32 {
        if self.a == v { self.b } else { self.a }
    }
}

/// Per-pass connectivity of a welded mesh.
///
/// Neighbor lists are kept sorted so every traversal, and therefore every
/// floating-point sum built from one, has a fixed order. Edges are numbered
/// in the order triangles first mention them.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    neighbors: Vec<Vec<u32>>,
    edges: Vec<EdgeRecord>,
    edge_ids: HashMap<EdgeKey, u32>,
    triangle_edges: Vec<[u32; 3]>,
}

impl Topology {
    /// Build adjacency and the edge table for `triangles`.
    ///
    /// Vertices that no triangle references get an empty neighbor list.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_subdivide::Topology;
    ///
    /// let topo = Topology::build(4, &[[0, 1, 2], [1, 3, 2]]);
    ///
    /// assert_eq!(topo.edge_count(), 5);
    /// assert_eq!(topo.boundary_edge_count(), 4);
    /// assert_eq!(topo.edge(2, 1).map(|e| e.opposite.clone()), Some(vec![0, 3]));
    /// assert_eq!(topo.neighbors(1), &[0, 2, 3]);
    /// ```
    #[must_use]
    pub fn build(vertex_count: usize, triangles: &[[u32; 3]]) -> Self {
        let mut neighbors: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];
        let mut edges: Vec<EdgeRecord> = Vec::with_capacity(triangles.len() * 3 / 2 + 3);
        let mut edge_ids: HashMap<EdgeKey, u32> = HashMap::with_capacity(edges.capacity());
        let mut triangle_edges = Vec::with_capacity(triangles.len());

        for tri in triangles {
            if let Some(&max) = tri.iter().max() {
                if max as usize >= neighbors.len() {
                    neighbors.resize(max as usize + 1, Vec::new());
                }
            }

            let mut tri_edges = [0; 3];
            for i in 0..3 {
                let v = tri[i];
                let w = tri[(i + 1) % 3];
                let opposite = tri[(i + 2) % 3];

                if v != w {
                    insert_sorted(&mut neighbors[v as usize], w);
                    insert_sorted(&mut neighbors[w as usize], v);
                }

                let key = normalize_edge(v, w);
                let id = *edge_ids.entry(key).or_insert_with(|| {
                    edges.push(EdgeRecord {
                        a: key.0,
                        b: key.1,
                        opposite: Vec::with_capacity(2),
                    });
                    (edges.len() - 1) as u32
                });
                insert_sorted(&mut edges[id as usize].opposite, opposite);
                tri_edges[i] = id;
            }
            triangle_edges.push(tri_edges);
        }

        Self {
            neighbors,
            edges,
            edge_ids,
            triangle_edges,
        }
    }

    /// Number of vertices covered by the adjacency table.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of distinct edges.
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Sorted neighbor ids of `v`; empty for unknown or isolated vertices.
    #[must_use]
    pub fn neighbors(&self, v: u32) -> &[u32] {
        self.neighbors.get(v as usize).map_or(&[], Vec::as_slice)
    }

    /// Number of distinct neighbors of `v`.
    #[inline]
    #[must_use]
    pub fn valence(&self, v: u32) -> usize {
        self.neighbors(v).len()
    }

    /// All edges in first-seen order.
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    /// Edge ids of every triangle, for its edges `(t0, t1)`, `(t1, t2)`, `(t2, t0)`.
    #[inline]
    #[must_use]
    pub fn triangle_edges(&self) -> &[[u32; 3]] {
        &self.triangle_edges
    }

    /// Id of the edge between `v0` and `v1`, in either order.
    #[must_use]
    pub fn edge_id(&self, v0: u32, v1: u32) -> Option<u32> {
        self.edge_ids.get(&normalize_edge(v0, v1)).copied()
    }

    /// The edge between `v0` and `v1`, in either order.
    #[must_use]
    pub fn edge(&self, v0: u32, v1: u32) -> Option<&EdgeRecord> {
        self.edge_id(v0, v1).map(|id| &self.edges[id as usize])
    }

    /// Neighbors of `v` reached through a boundary edge, ascending.
    pub fn boundary_neighbors(&self, v: u32) -> impl Iterator<Item = u32> + '_ {
        self.neighbors(v)
            .iter()
            .copied()
            .filter(move |&n| self.edge(v, n).is_some_and(EdgeRecord::is_boundary))
    }

    /// Check if any edge incident to `v` is a boundary edge.
    #[must_use]
    pub fn is_boundary_vertex(&self, v: u32) -> bool {
        self.boundary_neighbors(v).next().is_some()
    }

    /// Number of boundary edges.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_boundary()).count()
    }

    /// Number of edges shared by more than two triangles.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_non_manifold()).count()
    }

    /// Check if every edge borders exactly two triangles.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        !self.edges.is_empty() && self.edges.iter().all(|e| e.opposite.len() == 2)
    }
}
