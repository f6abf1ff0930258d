use crate::blend::{BlendContext, BlendMode, BlendProcs};
use crate::buffer::planar::PlaneLayout;
use crate::buffer::{PixelBuffer, SoftMaskBuffer};
use crate::composite::path::{ComposeConfig, ComposePath, select_compose_path};
use crate::composite::pixel::{
    composite_group, composite_knockout_group, composite_knockout_isolated, first_blend_spot,
    knockout_recomposite_group, merge_tag, recomposite_group, union_mul,
};
use crate::foundation::core::{ColorPolarity, Depth, IntRect, MAX_COLORANTS, MAX_PIXEL_SLOTS, tags};
use crate::foundation::error::{TransError, TransResult};
use crate::foundation::math::Sample;

/// Device-level parameters of a group composition.
#[derive(Clone, Copy, Debug, Default)]
pub struct ComposeParams {
    pub polarity: ColorPolarity,
    pub procs: BlendProcs,
    pub ctx: BlendContext,
    /// Restrict subtractive write-back to the components drawn in `ctx`.
    pub overprint: bool,
}

impl ComposeParams {
    pub fn new(polarity: ColorPolarity) -> Self {
        Self {
            polarity,
            ..Self::default()
        }
    }

    pub fn with_procs(mut self, procs: BlendProcs) -> Self {
        self.procs = procs;
        self
    }

    pub fn with_context(mut self, ctx: BlendContext) -> Self {
        self.ctx = ctx;
        self
    }

    pub fn with_overprint(mut self, overprint: bool) -> Self {
        self.overprint = overprint;
        self
    }

    /// Return `true` when write-back skips components missing from `drawn_comps`.
    pub fn writes_drawn_only(&self) -> bool {
        self.overprint && !self.polarity.is_additive()
    }
}

/// Composite the finished group `tos` into the next buffer down the stack.
///
/// The composed region is `tos.dirty ∩ tos.rect ∩ nos.rect`; `nos.dirty` grows to cover
/// `tos.dirty`. `mask` scales the group opacity per pixel.
pub fn compose_group(
    tos: &PixelBuffer,
    nos: &mut PixelBuffer,
    mask: Option<&SoftMaskBuffer>,
    params: &ComposeParams,
) -> TransResult<()> {
    compose(tos, nos, mask, params, None)
}

/// [`compose_group`] with an explicit loop choice.
///
/// `path` must be [`ComposePath::General`] or the path [`select_compose_path`] picks for
/// these buffers; any other choice ignores planes the specialised loop does not read.
pub fn compose_group_via(
    tos: &PixelBuffer,
    nos: &mut PixelBuffer,
    mask: Option<&SoftMaskBuffer>,
    params: &ComposeParams,
    path: ComposePath,
) -> TransResult<()> {
    compose(tos, nos, mask, params, Some(path))
}

fn compose(
    tos: &PixelBuffer,
    nos: &mut PixelBuffer,
    mask: Option<&SoftMaskBuffer>,
    params: &ComposeParams,
    forced: Option<ComposePath>,
) -> TransResult<()> {
    if tos.n_chan == 0 || nos.n_chan == 0 {
        return Ok(());
    }
    check_compatible(tos, nos, mask)?;
    nos.dirty = nos.dirty.union(tos.dirty);
    let region = tos.dirty.intersect(tos.rect).intersect(nos.rect);

    let cfg = ComposeConfig::new(tos, nos, mask, params, region);
    let path = forced.unwrap_or_else(|| select_compose_path(&cfg));
    tracing::debug!(
        ?region,
        mode = %tos.blend_mode,
        ?path,
        alpha = tos.alpha,
        "compose group"
    );
    match tos.depth {
        Depth::Eight => dispatch::<u8>(tos, nos, mask, params, region, path),
        Depth::Sixteen => dispatch::<u16>(tos, nos, mask, params, region, path),
    }
}

fn check_compatible(
    tos: &PixelBuffer,
    nos: &PixelBuffer,
    mask: Option<&SoftMaskBuffer>,
) -> TransResult<()> {
    if tos.depth != nos.depth {
        return Err(TransError::validation(format!(
            "group depth {:?} does not match destination depth {:?}",
            tos.depth, nos.depth
        )));
    }
    if tos.n_chan != nos.n_chan {
        return Err(TransError::validation(format!(
            "group has {} channels, destination has {}",
            tos.n_chan, nos.n_chan
        )));
    }
    if let Some(m) = mask
        && m.depth != tos.depth
    {
        return Err(TransError::validation(format!(
            "soft mask depth {:?} does not match group depth {:?}",
            m.depth, tos.depth
        )));
    }
    if let Some(bd) = &nos.backdrop
        && bd.len() < nos.n_chan * nos.planestride
    {
        return Err(TransError::validation(format!(
            "backdrop holds {} samples, {} needed",
            bd.len(),
            nos.n_chan * nos.planestride
        )));
    }
    Ok(())
}

/// Optional planes past colour and alpha.
#[derive(Clone, Copy, Debug, Default)]
struct AuxPlanes {
    shape: Option<usize>,
    alpha_g: Option<usize>,
    tag: Option<usize>,
}

impl AuxPlanes {
    fn of(buf: &PixelBuffer) -> Self {
        Self {
            shape: buf.shape_plane(),
            alpha_g: buf.alpha_g_plane(),
            tag: buf.tag_plane(),
        }
    }
}

/// Everything the per-pixel loop reads, resolved once per call.
struct Job<'a, S: Sample> {
    tos: &'a [S],
    tos_rect: IntRect,
    tos_layout: PlaneLayout,
    tos_planes: AuxPlanes,
    nos_rect: IntRect,
    nos_layout: PlaneLayout,
    nos_planes: AuxPlanes,
    backdrop: Option<&'a [S]>,
    n_comp: usize,
    complement: [bool; MAX_COLORANTS],
    alpha: S,
    shape: S,
    mode: BlendMode,
    first_blend_spot: usize,
    mask: Option<&'a SoftMaskBuffer>,
    nos_knockout: bool,
    nos_isolated: bool,
    tos_isolated: bool,
    drawn_only: bool,
    procs: &'a BlendProcs,
    ctx: &'a BlendContext,
}

const GENERAL: u8 = 0;
const SIMPLE: u8 = 1;
const KNOCKOUT_ISOLATED: u8 = 2;

fn dispatch<S: Sample>(
    tos: &PixelBuffer,
    nos: &mut PixelBuffer,
    mask: Option<&SoftMaskBuffer>,
    params: &ComposeParams,
    region: IntRect,
    path: ComposePath,
) -> TransResult<()> {
    if path == ComposePath::Noop {
        return Ok(());
    }
    let n_comp = tos.n_colorants();
    let mut complement = [false; MAX_COLORANTS];
    for (i, c) in complement.iter_mut().enumerate().take(n_comp) {
        *c = params.polarity.complements(i, n_comp, nos.num_spots);
    }
    let mode = tos.blend_mode;
    let nos_rect = nos.rect;
    let nos_layout = nos.layout();
    let nos_planes = AuxPlanes::of(nos);
    let nos_knockout = nos.knockout;
    let nos_isolated = nos.isolated;
    let num_spots = nos.num_spots;
    let backdrop = match &nos.backdrop {
        Some(bd) => Some(S::samples(bd).ok_or_else(|| {
            TransError::validation(format!("backdrop holds {:?} samples", bd.depth()))
        })?),
        None => None,
    };
    let job = Job {
        tos: tos.samples::<S>()?,
        tos_rect: tos.rect,
        tos_layout: tos.layout(),
        tos_planes: AuxPlanes::of(tos),
        nos_rect,
        nos_layout,
        nos_planes,
        backdrop,
        n_comp,
        complement,
        alpha: S::from_u16(tos.alpha),
        shape: S::from_u16(tos.shape),
        mode,
        first_blend_spot: first_blend_spot(n_comp, num_spots, mode),
        mask,
        nos_knockout,
        nos_isolated,
        tos_isolated: tos.isolated,
        drawn_only: params.writes_drawn_only(),
        procs: &params.procs,
        ctx: &params.ctx,
    };
    let nos_data = S::samples_mut(&mut nos.data)
        .ok_or_else(|| TransError::validation("destination sample depth changed"))?;

    match path {
        ComposePath::Noop => {}
        ComposePath::Simple {
            tos_isolated,
            masked,
            normal,
        } => match (tos_isolated, masked, normal) {
            (true, true, true) => compose_region::<S, SIMPLE, true, true, true>(&job, nos_data, region),
            (true, true, false) => compose_region::<S, SIMPLE, true, true, false>(&job, nos_data, region),
            (true, false, true) => compose_region::<S, SIMPLE, true, false, true>(&job, nos_data, region),
            (true, false, false) => compose_region::<S, SIMPLE, true, false, false>(&job, nos_data, region),
            (false, true, true) => compose_region::<S, SIMPLE, false, true, true>(&job, nos_data, region),
            (false, true, false) => compose_region::<S, SIMPLE, false, true, false>(&job, nos_data, region),
            (false, false, true) => compose_region::<S, SIMPLE, false, false, true>(&job, nos_data, region),
            (false, false, false) => compose_region::<S, SIMPLE, false, false, false>(&job, nos_data, region),
        },
        ComposePath::KnockoutIsolated { masked: true } => {
            compose_region::<S, KNOCKOUT_ISOLATED, false, true, false>(&job, nos_data, region)
        }
        ComposePath::KnockoutIsolated { masked: false } => {
            compose_region::<S, KNOCKOUT_ISOLATED, false, false, false>(&job, nos_data, region)
        }
        ComposePath::General => compose_region::<S, GENERAL, false, false, false>(&job, nos_data, region),
    }
    Ok(())
}

#[inline]
fn read_plane<S: Sample>(data: &[S], base: usize, planestride: usize, plane: Option<usize>) -> Option<S> {
    plane.map(|p| data[base + p * planestride])
}

/// Per-pixel group composition. `PATH` selects which flags are compile-time constants;
/// `GENERAL` reads every flag from `job`.
fn compose_region<
    S: Sample,
    const PATH: u8,
    const TOS_ISOLATED: bool,
    const MASKED: bool,
    const NORMAL: bool,
>(
    job: &Job<'_, S>,
    nos: &mut [S],
    region: IntRect,
) {
    let n_comp = job.n_comp;
    let tps = job.tos_layout.planestride;
    let nps = job.nos_layout.planestride;
    let knockout = match PATH {
        SIMPLE => false,
        KNOCKOUT_ISOLATED => true,
        _ => job.nos_knockout,
    };
    let nos_isolated = PATH == KNOCKOUT_ISOLATED || job.nos_isolated;
    let tos_isolated = if PATH == SIMPLE { TOS_ISOLATED } else { job.tos_isolated };
    let mask = if PATH == GENERAL || MASKED { job.mask } else { None };
    let mode = if PATH == SIMPLE && NORMAL { BlendMode::Normal } else { job.mode };
    let untouched = S::from_u16(tags::UNTOUCHED);

    let mut src = [S::ZERO; MAX_PIXEL_SLOTS];
    let mut dst = [S::ZERO; MAX_PIXEL_SLOTS];
    let mut back = [S::ZERO; MAX_PIXEL_SLOTS];

    for y in region.y0..region.y1 {
        for x in region.x0..region.x1 {
            let t = job.tos_layout.offset(
                (x - job.tos_rect.x0) as usize,
                (y - job.tos_rect.y0) as usize,
                0,
            );
            let n = job.nos_layout.offset(
                (x - job.nos_rect.x0) as usize,
                (y - job.nos_rect.y0) as usize,
                0,
            );
            for i in 0..n_comp {
                src[i] = decode(job.tos[t + i * tps], job.complement[i]);
                dst[i] = decode(nos[n + i * nps], job.complement[i]);
            }
            src[n_comp] = job.tos[t + n_comp * tps];
            dst[n_comp] = nos[n + n_comp * nps];

            let pix_alpha = match mask {
                Some(m) => S::mul(job.alpha, m.sample::<S>(x, y)),
                None => job.alpha,
            };
            let tos_shape = read_plane(job.tos, t, tps, job.tos_planes.shape).unwrap_or(S::FULL);
            let tos_tag = read_plane(job.tos, t, tps, job.tos_planes.tag);
            let mut nos_shape = read_plane(nos, n, nps, job.nos_planes.shape);
            let mut nos_alpha_g = read_plane(nos, n, nps, job.nos_planes.alpha_g);
            let mut nos_tag = read_plane(nos, n, nps, job.nos_planes.tag);

            if knockout {
                match (nos_isolated, job.backdrop) {
                    (false, Some(bd)) => {
                        for i in 0..n_comp {
                            back[i] = decode(bd[n + i * nps], job.complement[i]);
                        }
                        back[n_comp] = bd[n + n_comp * nps];
                        if tos_isolated {
                            composite_knockout_group(
                                &back,
                                tos_shape,
                                &mut dst,
                                nos_alpha_g.as_mut(),
                                &src,
                                n_comp,
                                pix_alpha,
                                mode,
                                job.first_blend_spot,
                                mask.is_some(),
                                job.procs,
                                job.ctx,
                            );
                        } else {
                            let tos_alpha_g = read_plane(job.tos, t, tps, job.tos_planes.alpha_g)
                                .unwrap_or(src[n_comp]);
                            knockout_recomposite_group(
                                &back,
                                tos_shape,
                                &mut dst,
                                nos_alpha_g.as_mut(),
                                &src,
                                tos_alpha_g,
                                n_comp,
                                pix_alpha,
                                mode,
                                job.first_blend_spot,
                                mask.is_some(),
                                job.procs,
                                job.ctx,
                            );
                        }
                    }
                    _ => composite_knockout_isolated(
                        &mut dst,
                        nos_shape.as_mut(),
                        nos_tag.as_mut(),
                        &src,
                        n_comp,
                        tos_shape,
                        tos_tag.unwrap_or(untouched),
                        pix_alpha,
                        job.shape,
                    ),
                }
            } else {
                if tos_isolated {
                    composite_group(
                        &mut dst,
                        nos_alpha_g.as_mut(),
                        &src,
                        n_comp,
                        pix_alpha,
                        mode,
                        job.first_blend_spot,
                        job.procs,
                        job.ctx,
                    );
                } else {
                    let tos_alpha_g =
                        read_plane(job.tos, t, tps, job.tos_planes.alpha_g).unwrap_or(src[n_comp]);
                    recomposite_group(
                        &mut dst,
                        nos_alpha_g.as_mut(),
                        &src,
                        tos_alpha_g,
                        n_comp,
                        pix_alpha,
                        mode,
                        job.first_blend_spot,
                        job.procs,
                        job.ctx,
                    );
                }
                if let (Some(tt), Some(nt)) = (tos_tag, nos_tag.as_mut()) {
                    if pix_alpha == S::FULL {
                        *nt = tt;
                    } else if pix_alpha != S::ZERO && tt != untouched {
                        *nt = merge_tag(*nt, tt);
                    }
                }
            }
            if let Some(ns) = nos_shape.as_mut() {
                *ns = union_mul(*ns, tos_shape, job.shape);
            }

            for i in 0..n_comp {
                if !job.drawn_only || job.ctx.is_drawn(i) {
                    nos[n + i * nps] = decode(dst[i], job.complement[i]);
                }
            }
            nos[n + n_comp * nps] = dst[n_comp];
            write_plane(nos, n, nps, job.nos_planes.shape, nos_shape);
            write_plane(nos, n, nps, job.nos_planes.alpha_g, nos_alpha_g);
            write_plane(nos, n, nps, job.nos_planes.tag, nos_tag);
        }
    }
}

/// Convert between stored and blending polarity (the conversion is its own inverse).
#[inline]
fn decode<S: Sample>(v: S, complement: bool) -> S {
    if complement { v.complement() } else { v }
}

#[inline]
fn write_plane<S: Sample>(data: &mut [S], base: usize, planestride: usize, plane: Option<usize>, v: Option<S>) {
    if let (Some(p), Some(v)) = (plane, v) {
        data[base + p * planestride] = v;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/group.rs"]
mod tests;
