use crate::math::{Isometry, Real};
use crate::query::contact_manifolds::ContactBuffer;
use crate::query::epa::Epa;
use crate::query::gjk::{self, GjkOptions, Simplex};
use crate::query::{Contact, SpaceMapping};
use crate::shape::SupportMap;

/// Computes the contact between two overlapping support-mapped shapes.
///
/// GJK first decides whether the shapes overlap; if they do, EPA computes the penetration
/// depth and direction. At most one contact is emitted, and only for a strictly positive
/// penetration depth.
pub fn contact_manifold_support_map_support_map<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    gjk_options: &GjkOptions,
    simplex: &mut Simplex,
    epa: &mut Epa,
    out: &mut ContactBuffer,
) where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let options = GjkOptions {
        margin: 0.0,
        ..*gjk_options
    };
    let mapping = SpaceMapping::new(&Isometry::identity(), pos12);
    let dist = gjk::distance(
        g1,
        g2,
        &mapping,
        &pos12.translation.vector,
        &options,
        simplex,
    );

    if dist > 0.0 {
        return;
    }

    let Some((pt1, pt2, normal1)) = epa.closest_points(pos12, g1, g2, simplex) else {
        log::debug!("EPA failed on overlapping shapes, no contact.");
        return;
    };

    let dist = (pt2 - pt1).dot(&normal1);
    if dist >= 0.0 {
        return;
    }

    out.push(Contact::new(
        pt1,
        pos12.inverse_transform_point(&pt2),
        normal1,
        pos12.inverse_transform_unit_vector(&-normal1),
        dist,
    ));
}
