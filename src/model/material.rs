//! Region materials.
//!
//! A material is a named density plus an elemental composition by mass
//! fraction. The phantom material file is an MCNP-style card deck: each
//! block starts with a comment card carrying the name and density and an
//! `m<ID>` card binding it to a region, followed by `ZAID fraction` rows
//! (fractions are written negative, meaning mass fraction).

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

/// A tissue material: density and elemental mass fractions.
#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    pub density_g_cm3: f64,
    /// (atomic number Z, mass fraction) pairs.
    pub elements: Vec<(u32, f64)>,
}

impl Material {
    /// Generic soft-tissue equivalent used when a region has no material
    /// entry (water composition, unit density).
    pub fn soft_tissue_equivalent() -> Self {
        Self {
            name: "SoftTissueEquivalent".to_string(),
            density_g_cm3: 1.0,
            elements: vec![(1, 0.111894), (8, 0.888106)],
        }
    }
}

/// Parse the phantom material card deck into a region-id keyed table.
pub fn parse_material_file<P: AsRef<Path>>(path: P) -> Result<HashMap<i32, Material>> {
    let contents = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("loading material file {:?}", path.as_ref()))?;
    let table = parse_material_deck(&contents)?;
    log::info!("Loaded {} region materials", table.len());
    Ok(table)
}

/// Parse an in-memory material card deck.
pub fn parse_material_deck(contents: &str) -> Result<HashMap<i32, Material>> {
    let mut table = HashMap::new();
    let mut lines = contents.lines().peekable();

    while let Some(line) = lines.next() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        // Block header: "C <name> <density> g/cm3"
        if fields.first() != Some(&"C") || fields.len() < 3 {
            continue;
        }
        let name = fields[1].to_string();
        let density_g_cm3: f64 = fields[2]
            .parse()
            .with_context(|| format!("material {}: density", name))?;

        // Region binding card: "m<ID>"
        let binding = lines
            .next()
            .with_context(|| format!("material {}: missing m-card", name))?;
        let binding = binding.trim();
        let region_id: i32 = binding
            .strip_prefix('m')
            .unwrap_or(binding)
            .parse()
            .with_context(|| format!("material {}: m-card '{}'", name, binding))?;

        // Composition rows until the next comment card.
        let mut elements = Vec::new();
        while let Some(next) = lines.peek() {
            if next.trim_start().starts_with('C') {
                break;
            }
            let row = lines.next().unwrap();
            let mut tokens = row.split_whitespace();
            let (Some(zaid), Some(fraction)) = (tokens.next(), tokens.next()) else {
                continue;
            };
            let zaid: u32 = zaid
                .parse()
                .with_context(|| format!("material {}: ZAID '{}'", name, zaid))?;
            let fraction: f64 = fraction
                .parse()
                .with_context(|| format!("material {}: fraction", name))?;
            // File stores mass fractions negative; Z is ZAID/1000.
            elements.push((zaid / 1000, -fraction));
        }

        table.insert(
            region_id,
            Material {
                name,
                density_g_cm3,
                elements,
            },
        );
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECK: &str = "\
C  Liver  1.050 g/cm3
m89
1000 -0.102
6000 -0.131
8000 -0.767
C  Adipose  0.950 g/cm3
m121
1000 -0.114
6000 -0.598
8000 -0.288
";

    #[test]
    fn deck_parses_into_region_keyed_materials() {
        let table = parse_material_deck(DECK).unwrap();
        assert_eq!(table.len(), 2);

        let liver = &table[&89];
        assert_eq!(liver.name, "Liver");
        assert!((liver.density_g_cm3 - 1.050).abs() < 1e-12);
        assert_eq!(liver.elements, vec![(1, 0.102), (6, 0.131), (8, 0.767)]);

        let adipose = &table[&121];
        assert!((adipose.density_g_cm3 - 0.950).abs() < 1e-12);
    }

    #[test]
    fn mass_fractions_sum_to_one() {
        let table = parse_material_deck(DECK).unwrap();
        for material in table.values() {
            let total: f64 = material.elements.iter().map(|(_, f)| f).sum();
            assert!((total - 1.0).abs() < 1e-9, "material {}", material.name);
        }
    }

    #[test]
    fn default_material_is_water_like() {
        let material = Material::soft_tissue_equivalent();
        assert!((material.density_g_cm3 - 1.0).abs() < 1e-12);
        let total: f64 = material.elements.iter().map(|(_, f)| f).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }
}
