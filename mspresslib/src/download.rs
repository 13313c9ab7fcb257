//! Reference dataset retrieval.
//!
//! The figures of the manuscript are built from fixed reference datasets,
//! fetched per file over plain HTTP from a released data archive. Each
//! dataset names its remote directory, destination under the project data
//! directory and file list; a failed transfer aborts the run.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use crate::config::Layout;
use crate::error::MspressError;
use crate::Result;

/// Base URL all dataset files are fetched from.
pub const BASE_URL: &str = "https://github.com/gammapy/gammapy-data/raw/v1.0/";

/// A group of files fetched from one remote directory.
#[derive(Debug, Clone, Copy)]
pub struct FileGroup {
    /// Path prefix under the base URL
    pub remote: &'static str,
    /// Destination directory under the project data directory
    pub dest: &'static str,
    /// File paths relative to both `remote` and `dest`
    pub files: &'static [&'static str],
}

/// A named dataset in the registry.
#[derive(Debug, Clone, Copy)]
pub struct Dataset {
    /// Registry name
    pub name: &'static str,
    /// File groups to fetch
    pub groups: &'static [FileGroup],
}

const FERMI_GC: FileGroup = FileGroup {
    remote: "fermi-3fhl-gc",
    dest: "fermi-ts-map/input",
    files: &[
        "fermi-3fhl-gc-counts-cube.fits.gz",
        "fermi-3fhl-gc-background-cube.fits.gz",
        "fermi-3fhl-gc-exposure-cube.fits.gz",
        "fermi-3fhl-gc-psf-cube.fits.gz",
    ],
};

const CTA_1DC: FileGroup = FileGroup {
    remote: "cta-1dc",
    dest: "cta-galactic-center/input",
    files: &[
        "index/gps/hdu-index.fits.gz",
        "index/gps/obs-index.fits.gz",
        "data/baseline/gps/gps_baseline_110380.fits",
        "data/baseline/gps/gps_baseline_111140.fits",
        "data/baseline/gps/gps_baseline_111159.fits",
        "caldb/data/cta/1dc/bcf/South_z20_50h/irf_file.fits",
    ],
};

const FERMI_3FHL_CRAB: FileGroup = FileGroup {
    remote: "fermi-3fhl-crab",
    dest: "multi-instrument/input/fermi",
    files: &[
        "Fermi-LAT-3FHL_data_Fermi-LAT.fits",
        "Fermi-LAT-3FHL_iem.fits",
        "Fermi-LAT-3FHL_datasets.yaml",
        "Fermi-LAT-3FHL_models.yaml",
    ],
};

const MAGIC: FileGroup = FileGroup {
    remote: "magic/rad_max/data",
    dest: "multi-instrument/input/magic",
    files: &[
        "hdu-index.fits.gz",
        "obs-index.fits.gz",
        "20131004_05029747_DL3_CrabNebula-W0.40+035.fits",
        "20131004_05029748_DL3_CrabNebula-W0.40+215.fits",
    ],
};

const HAWC: FileGroup = FileGroup {
    remote: "hawc_crab",
    dest: "multi-instrument/input/hawc",
    files: &["HAWC19_flux_points.fits"],
};

const HAWC_DL3: FileGroup = FileGroup {
    remote: "hawc/crab_events_pass4",
    dest: "hawc-dl3",
    files: &[
        "hdu-index-table-GP-Crab.fits.gz",
        "obs-index-table-GP-Crab.fits.gz",
        "irfs/EffectiveAreaMap_Crab_fHitbin5GP.fits.gz",
        "irfs/EffectiveAreaMap_Crab_fHitbin6GP.fits.gz",
        "irfs/EffectiveAreaMap_Crab_fHitbin7GP.fits.gz",
        "irfs/EffectiveAreaMap_Crab_fHitbin8GP.fits.gz",
        "irfs/EffectiveAreaMap_Crab_fHitbin9GP.fits.gz",
        "irfs/PSFMap_Crab_fHitbin5GP.fits.gz",
        "irfs/PSFMap_Crab_fHitbin6GP.fits.gz",
        "irfs/PSFMap_Crab_fHitbin7GP.fits.gz",
        "irfs/PSFMap_Crab_fHitbin8GP.fits.gz",
        "irfs/PSFMap_Crab_fHitbin9GP.fits.gz",
    ],
};

const PKS_FLARE: FileGroup = FileGroup {
    remote: "hess-dl3-dr1",
    dest: "lightcurve/input",
    files: &[
        "obs-index.fits.gz",
        "hdu-index.fits.gz",
        "data/hess_dl3_dr1_obs_id_033787.fits.gz",
        "data/hess_dl3_dr1_obs_id_033788.fits.gz",
        "data/hess_dl3_dr1_obs_id_033789.fits.gz",
        "data/hess_dl3_dr1_obs_id_033790.fits.gz",
        "data/hess_dl3_dr1_obs_id_033791.fits.gz",
        "data/hess_dl3_dr1_obs_id_033792.fits.gz",
        "data/hess_dl3_dr1_obs_id_033793.fits.gz",
        "data/hess_dl3_dr1_obs_id_033794.fits.gz",
        "data/hess_dl3_dr1_obs_id_033795.fits.gz",
        "data/hess_dl3_dr1_obs_id_033796.fits.gz",
        "data/hess_dl3_dr1_obs_id_033797.fits.gz",
        "data/hess_dl3_dr1_obs_id_033798.fits.gz",
        "data/hess_dl3_dr1_obs_id_033799.fits.gz",
        "data/hess_dl3_dr1_obs_id_033800.fits.gz",
        "data/hess_dl3_dr1_obs_id_033801.fits.gz",
    ],
};

/// The dataset registry.
pub const DATASETS: &[Dataset] = &[
    Dataset {
        name: "fermi-gc",
        groups: &[FERMI_GC],
    },
    Dataset {
        name: "cta-1dc",
        groups: &[CTA_1DC],
    },
    Dataset {
        name: "pks-flare",
        groups: &[PKS_FLARE],
    },
    Dataset {
        name: "multi-instrument",
        groups: &[FERMI_3FHL_CRAB, MAGIC, HAWC],
    },
    Dataset {
        name: "hawc-dl3",
        groups: &[HAWC_DL3],
    },
];

/// Look up a dataset by registry name.
pub fn dataset(name: &str) -> Option<&'static Dataset> {
    DATASETS.iter().find(|d| d.name == name)
}

/// Names of all registered datasets.
pub fn dataset_names() -> Vec<&'static str> {
    DATASETS.iter().map(|d| d.name).collect()
}

/// Download every file of a named dataset into the layout's data directory.
pub fn download_dataset(layout: &Layout, name: &str) -> Result<()> {
    let dataset = dataset(name).ok_or_else(|| MspressError::UnknownDataset(name.to_string()))?;

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| MspressError::Download {
            url: BASE_URL.to_string(),
            message: e.to_string(),
        })?;

    for group in dataset.groups {
        for file in group.files {
            let url = format!("{BASE_URL}{}/{file}", group.remote);
            let dest = layout.data_dir.join(group.dest).join(file);
            fetch(&client, &url, &dest)?;
        }
    }

    Ok(())
}

/// Fetch one file, writing through a temporary path so an aborted transfer
/// leaves no truncated file behind.
fn fetch(client: &reqwest::blocking::Client, url: &str, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    log::info!("downloading {url}");
    let mut response = client
        .get(url)
        .send()
        .map_err(|e| MspressError::Download {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    if !response.status().is_success() {
        return Err(MspressError::Download {
            url: url.to_string(),
            message: format!("status {}", response.status()),
        });
    }

    let tmp = dest.with_extension("part");
    let mut file = io::BufWriter::new(fs::File::create(&tmp)?);
    io::copy(&mut response, &mut file)?;
    file.flush()?;
    drop(file);
    fs::rename(&tmp, dest)?;

    Ok(())
}
