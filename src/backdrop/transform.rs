use crate::buffer::PlaneLayout;

/// Read-only planar rectangle handed to a [`ColorTransform`]. `data` starts at the
/// region's first sample.
#[derive(Clone, Copy, Debug)]
pub struct PlanarRegion<'a, S> {
    pub data: &'a [S],
    pub layout: PlaneLayout,
    pub width: usize,
    pub height: usize,
    pub n_planes: usize,
}

impl<S: Copy> PlanarRegion<'_, S> {
    #[inline]
    pub fn get(&self, col: usize, row: usize, plane: usize) -> S {
        self.data[self.layout.offset(col, row, plane)]
    }
}

/// Writable planar rectangle handed to a [`ColorTransform`].
#[derive(Debug)]
pub struct PlanarRegionMut<'a, S> {
    pub data: &'a mut [S],
    pub layout: PlaneLayout,
    pub width: usize,
    pub height: usize,
    pub n_planes: usize,
}

impl<S: Copy> PlanarRegionMut<'_, S> {
    #[inline]
    pub fn set(&mut self, col: usize, row: usize, plane: usize, value: S) {
        let idx = self.layout.offset(col, row, plane);
        self.data[idx] = value;
    }
}

/// Colour conversion between a parent buffer's colour planes and a new group's colour
/// space. Implementations write every colour plane of `dst` over `width x height`.
pub trait ColorTransform: Send + Sync {
    /// Return `true` when the conversion leaves samples unchanged; callers then copy.
    fn is_identity(&self) -> bool {
        false
    }

    fn transform_8(&self, src: PlanarRegion<'_, u8>, dst: PlanarRegionMut<'_, u8>) -> anyhow::Result<()>;

    fn transform_16(&self, src: PlanarRegion<'_, u16>, dst: PlanarRegionMut<'_, u16>) -> anyhow::Result<()>;
}
