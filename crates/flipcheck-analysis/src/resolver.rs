//! Maps a pair's modeled conformation onto reference and alternative geometries.
//!
//! The purine of an `anti` pair was modeled as WC, so WC columns are the
//! reference. A `syn` purine was modeled as HG and the roles swap. Every
//! metric lookup and image path goes through [`RoleMapping`].

use std::path::{Path, PathBuf};

use flipcheck_core::constants::PURINE_CODES;
use flipcheck_core::errors::ResolveError;
use flipcheck_core::types::{
    CompositeKey, Conformation, ConformationLabel, Geometry, Metric, Nucleotide, Role,
};
use flipcheck_storage::delta::signed_delta;
use flipcheck_storage::CombinedRecord;
use serde::Serialize;

/// Which geometry plays which role for one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleMapping {
    pub reference: Geometry,
    pub alternative: Geometry,
}

impl RoleMapping {
    /// WC is the reference.
    pub const DIRECT: RoleMapping = RoleMapping {
        reference: Geometry::Wc,
        alternative: Geometry::Hg,
    };

    /// HG is the reference.
    pub const SWAPPED: RoleMapping = RoleMapping {
        reference: Geometry::Hg,
        alternative: Geometry::Wc,
    };

    /// `anti` keeps the columns as labeled, `syn` swaps them. Anything else
    /// is rejected unless `allow_unknown`, in which case it is left unswapped.
    pub fn for_conformation(
        conformation: &Conformation,
        allow_unknown: bool,
    ) -> Result<Self, ResolveError> {
        match conformation {
            Conformation::Anti => Ok(Self::DIRECT),
            Conformation::Syn => Ok(Self::SWAPPED),
            Conformation::Other(_) if allow_unknown => Ok(Self::DIRECT),
            Conformation::Other(raw) => Err(ResolveError::UnknownConformation { value: raw.clone() }),
        }
    }

    pub fn geometry(&self, role: Role) -> Geometry {
        match role {
            Role::Reference => self.reference,
            Role::Alternative => self.alternative,
        }
    }

    pub fn is_swapped(&self) -> bool {
        self.reference == Geometry::Hg
    }
}

/// A pair resolved against the conformation its purine was modeled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub purine: Nucleotide,
    pub conformation: Conformation,
    pub conformation_bp: ConformationLabel,
    pub mapping: RoleMapping,
}

impl Resolution {
    /// Name of the per-pair working directory: `<pdb>_<chain>_<number>` of the purine.
    pub fn pair_dir_name(&self, key: &CompositeKey) -> String {
        format!("{}_{}_{}", key.pdb_id, self.purine.chain, self.purine.number)
    }
}

fn is_purine(nt_type: &str) -> bool {
    PURINE_CODES.contains(&nt_type)
}

/// The purine side of `key`. Exactly one side must be a purine.
pub fn purine_side(key: &CompositeKey) -> Result<Nucleotide, ResolveError> {
    match (is_purine(&key.nt_type_1), is_purine(&key.nt_type_2)) {
        (true, false) => Ok(key.side_1()),
        (false, true) => Ok(key.side_2()),
        (true, true) => Err(ResolveError::BothPurines {
            pair: key.to_string(),
        }),
        (false, false) => Err(ResolveError::NoPurine {
            pair: key.to_string(),
        }),
    }
}

/// Resolve `key` given the modeled conformation of each side. Only the
/// purine side's conformation is consulted.
pub fn resolve(
    key: &CompositeKey,
    conformation_1: &str,
    conformation_2: &str,
    allow_unknown: bool,
) -> Result<Resolution, ResolveError> {
    let purine = purine_side(key)?;
    let raw = if purine == key.side_1() {
        conformation_1
    } else {
        conformation_2
    };
    let conformation = Conformation::parse(raw);
    let mapping = RoleMapping::for_conformation(&conformation, allow_unknown)?;
    Ok(Resolution {
        purine,
        conformation_bp: conformation.label(),
        conformation,
        mapping,
    })
}

/// A combined record read through a [`RoleMapping`].
#[derive(Debug, Clone, Copy)]
pub struct ResolvedView<'a> {
    record: &'a CombinedRecord,
    mapping: RoleMapping,
}

impl<'a> ResolvedView<'a> {
    pub fn new(record: &'a CombinedRecord, mapping: RoleMapping) -> Self {
        Self { record, mapping }
    }

    pub fn record(&self) -> &'a CombinedRecord {
        self.record
    }

    pub fn mapping(&self) -> RoleMapping {
        self.mapping
    }

    pub fn field(&self, role: Role, metric: Metric) -> Option<f64> {
        self.record.get(metric, self.mapping.geometry(role))
    }

    /// `reference - alternative`, recomputed from the raw values.
    pub fn delta(&self, metric: Metric) -> Option<f64> {
        signed_delta(
            self.field(Role::Reference, metric),
            self.field(Role::Alternative, metric),
        )
    }

    /// True when every quality metric is missing under both roles.
    pub fn all_quality_missing(&self) -> bool {
        Metric::QUALITY.iter().all(|&m| {
            self.field(Role::Reference, m).is_none() && self.field(Role::Alternative, m).is_none()
        })
    }
}

/// First existing `<root>/<name>` among `roots`, else `<roots[0]>/<name>`.
pub fn locate_pair_dir(roots: &[PathBuf], name: &str) -> PathBuf {
    roots
        .iter()
        .map(|root| root.join(name))
        .find(|candidate| candidate.is_dir())
        .or_else(|| roots.first().map(|root| root.join(name)))
        .unwrap_or_else(|| PathBuf::from(name))
}

/// Front and 90-degree rendered views of one model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePaths {
    pub geometry: Geometry,
    pub front: PathBuf,
    pub rotated: PathBuf,
}

impl ImagePaths {
    /// `<pair dir>/<geom>/<pdb>_<c1>_<n1>_<c2>_<n2>_<geom>_map_water[_90].png`
    pub fn for_geometry(pair_dir: &Path, key: &CompositeKey, geometry: Geometry) -> Self {
        let stem = format!(
            "{}_{}_{}_{}_{}_{}_map_water",
            key.pdb_id, key.chain_1, key.nt_number_1, key.chain_2, key.nt_number_2, geometry
        );
        let dir = pair_dir.join(geometry.label());
        Self {
            geometry,
            front: dir.join(format!("{stem}.png")),
            rotated: dir.join(format!("{stem}_90.png")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(t1: &str, t2: &str) -> CompositeKey {
        CompositeKey::new("1abc", "A", t1, 5, "B", t2, 9)
    }

    #[test]
    fn purine_on_either_side() {
        assert_eq!(purine_side(&key("G", "C")).unwrap().chain, "A");
        assert_eq!(purine_side(&key("U", "A")).unwrap().number, 9);
        assert!(matches!(
            purine_side(&key("A", "G")),
            Err(ResolveError::BothPurines { .. })
        ));
        assert!(matches!(
            purine_side(&key("C", "U")),
            Err(ResolveError::NoPurine { .. })
        ));
    }

    #[test]
    fn conformation_of_purine_side_decides_swap() {
        let r = resolve(&key("C", "G"), "anti", "syn", false).unwrap();
        assert!(r.mapping.is_swapped());
        assert_eq!(r.conformation_bp, ConformationLabel::Hg);
        let r = resolve(&key("G", "C"), "anti", "syn", false).unwrap();
        assert_eq!(r.mapping, RoleMapping::DIRECT);
        assert_eq!(r.conformation_bp, ConformationLabel::Wc);
    }

    #[test]
    fn unknown_conformation() {
        assert!(matches!(
            resolve(&key("G", "C"), "high-anti", "anti", false),
            Err(ResolveError::UnknownConformation { .. })
        ));
        let r = resolve(&key("G", "C"), "high-anti", "anti", true).unwrap();
        assert_eq!(r.mapping, RoleMapping::DIRECT);
        assert_eq!(r.conformation_bp, ConformationLabel::Other);
    }

    #[test]
    fn pair_dir_uses_purine() {
        let k = key("U", "A");
        let r = resolve(&k, "anti", "anti", false).unwrap();
        assert_eq!(r.pair_dir_name(&k), "1abc_B_9");
    }

    #[test]
    fn image_paths_follow_geometry() {
        let k = key("G", "C");
        let img = ImagePaths::for_geometry(Path::new("root/1abc_A_5"), &k, Geometry::Hg);
        assert_eq!(
            img.front,
            PathBuf::from("root/1abc_A_5/HG/1abc_A_5_B_9_HG_map_water.png")
        );
        assert_eq!(
            img.rotated,
            PathBuf::from("root/1abc_A_5/HG/1abc_A_5_B_9_HG_map_water_90.png")
        );
    }

    #[test]
    fn pair_dir_falls_back_to_first_root() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        std::fs::create_dir_all(second.join("1abc_A_5")).unwrap();
        let roots = vec![first.clone(), second.clone()];
        assert_eq!(locate_pair_dir(&roots, "1abc_A_5"), second.join("1abc_A_5"));
        assert_eq!(locate_pair_dir(&roots, "2xyz_A_1"), first.join("2xyz_A_1"));
    }
}
