//! Sharded persistence of a commitment key.
//!
//! Layout of a key directory:
//! - `trapdoors.data`: `ell` as `u64` little-endian followed by the compressed encodings of
//!   `s, g, h, g_neg, h_neg, e_gh, e_gh_inv, alpha, ped_h`, the auxiliary `a`s, the auxiliary
//!   `b`s and finally `g_alpha`.
//! - `prk-NN.data`, `vrk-NN.data`, `vrk-kea-NN.data`, `ped-vrk-NN.data`,
//!   `ped-vrk-kea-NN.data`: shard `NN` of `pk`, `vk`, `vk_alpha`, `ped_vk` and `ped_vk_alpha`,
//!   holding indices `[NN * step, (NN + 1) * step)` with `step = ceil((q + 1) / shards)`.
//!
//! Shards are independent, so with the `parallel` feature they are written and read on a
//! worker pool of `workers` threads.
use crate::error::{invalid_args, parameter_corruption, SResult};
use crate::setup::{CommitmentKey, Trapdoor, MAX_ELL, SPARE};
use ark_ec::pairing::{Pairing, PairingOutput};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::fs::{self, File};
use ark_std::io::{BufReader, BufWriter, Read, Write};
use ark_std::path::{Path, PathBuf};
use ark_std::string::String;
use ark_std::vec::Vec;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

const HEADER_FILE: &str = "trapdoors.data";
const PK_PREFIX: &str = "prk";
const VK_PREFIX: &str = "vrk";
const VK_ALPHA_PREFIX: &str = "vrk-kea";
const PED_VK_PREFIX: &str = "ped-vrk";
const PED_VK_ALPHA_PREFIX: &str = "ped-vrk-kea";

/// Where and how a commitment key is stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyStoreConfig {
    dir: PathBuf,
    shards: usize,
    workers: usize,
}

impl Default for KeyStoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("pkvk"),
            shards: 16,
            workers: 16,
        }
    }
}

impl KeyStoreConfig {
    /// Default sharding in `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Number of files per sequence. Also resets the worker count to match.
    pub fn with_shards(mut self, shards: usize) -> Self {
        self.shards = shards;
        self.workers = shards;
        self
    }

    /// Width of the worker pool.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// key directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// number of shards per sequence
    pub fn shards(&self) -> usize {
        self.shards
    }

    /// worker pool width
    pub fn workers(&self) -> usize {
        self.workers
    }

    fn shard_path(&self, prefix: &str, shard: usize) -> PathBuf {
        self.dir.join(self.shard_name(prefix, shard))
    }

    /// Shard indices are zero-padded to at least two digits and to the width of the last index.
    fn shard_name(&self, prefix: &str, shard: usize) -> String {
        let width = self.shards.saturating_sub(1).to_string().len().max(2);
        format!("{}-{:0width$}.data", prefix, shard, width = width)
    }

    fn check(&self) -> SResult<()> {
        if self.shards == 0 || self.workers == 0 {
            return Err(invalid_args("shards and workers must be positive"));
        }
        Ok(())
    }
}

/// Index range of `shard` when `len` entries are split over `shards` files.
fn shard_range(len: usize, shards: usize, shard: usize) -> (usize, usize) {
    let step = (len + shards - 1) / shards;
    let start = (shard * step).min(len);
    let end = ((shard + 1) * step).min(len);
    (start, end)
}

fn corrupt<E>(what: &str) -> impl FnOnce(E) -> crate::Error + '_ {
    move |_| parameter_corruption(what)
}

/// Run `f` on every task, on a pool of `workers` threads when `parallel` is enabled.
fn run_tasks<T, R, F>(workers: usize, tasks: &[T], f: F) -> SResult<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> SResult<R> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|_| invalid_args("cannot start the worker pool"))?;
        pool.install(|| tasks.par_iter().map(&f).collect())
    }
    #[cfg(not(feature = "parallel"))]
    {
        let _ = workers;
        tasks.iter().map(f).collect()
    }
}

fn write_shard<G: CanonicalSerialize>(path: &Path, elements: &[G]) -> SResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for element in elements {
        element.serialize_compressed(&mut writer)?;
    }
    writer.flush()?;
    Ok(())
}

fn read_shard<G: CanonicalDeserialize>(path: &Path, count: usize) -> SResult<Vec<G>> {
    let name = path.display().to_string();
    let file = File::open(path).map_err(corrupt(&name))?;
    let mut reader = BufReader::new(file);
    (0..count)
        .map(|_| G::deserialize_compressed(&mut reader).map_err(corrupt(&name)))
        .collect()
}

/// List the shard files of `prefix`, sorted by shard index.
fn discover(dir: &Path, prefix: &str) -> SResult<Vec<PathBuf>> {
    let pattern = format!("{}-", prefix);
    let mut found: Vec<(usize, PathBuf)> = fs::read_dir(dir)
        .map_err(corrupt("key directory"))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter_map(|path| {
            let index = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_prefix(pattern.as_str()))
                .and_then(|rest| rest.strip_suffix(".data"))
                .filter(|index| !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()))
                .and_then(|index| index.parse().ok())?;
            Some((index, path))
        })
        .collect();
    found.sort();
    Ok(found.into_iter().map(|(_, path)| path).collect())
}

struct ShardTask {
    prefix: &'static str,
    shard: usize,
}

fn shard_tasks(shards: usize) -> Vec<ShardTask> {
    [
        PK_PREFIX,
        VK_PREFIX,
        VK_ALPHA_PREFIX,
        PED_VK_PREFIX,
        PED_VK_ALPHA_PREFIX,
    ]
    .into_iter()
    .flat_map(|prefix| (0..shards).map(move |shard| ShardTask { prefix, shard }))
    .collect()
}

enum Shard<E: Pairing> {
    G1(Vec<E::G1Affine>),
    G2(Vec<E::G2Affine>),
}

struct Header<E: Pairing> {
    ell: usize,
    s: E::ScalarField,
    g: E::G1Affine,
    h: E::G2Affine,
    g_neg: E::G1Affine,
    h_neg: E::G2Affine,
    e_gh: PairingOutput<E>,
    e_gh_inv: PairingOutput<E>,
    alpha: E::ScalarField,
    ped_h: E::G2Affine,
    a: Vec<E::G1Affine>,
    b: Vec<E::G2Affine>,
    g_alpha: E::G1Affine,
}

fn read_header<E: Pairing, Rd: Read>(mut r: Rd) -> SResult<Header<E>> {
    fn field<T: CanonicalDeserialize, Rd: Read>(r: &mut Rd) -> SResult<T> {
        T::deserialize_compressed(r).map_err(corrupt(HEADER_FILE))
    }
    let mut ell = [0u8; 8];
    r.read_exact(&mut ell).map_err(corrupt(HEADER_FILE))?;
    let ell = u64::from_le_bytes(ell) as usize;
    Ok(Header {
        ell,
        s: field(&mut r)?,
        g: field(&mut r)?,
        h: field(&mut r)?,
        g_neg: field(&mut r)?,
        h_neg: field(&mut r)?,
        e_gh: field(&mut r)?,
        e_gh_inv: field(&mut r)?,
        alpha: field(&mut r)?,
        ped_h: field(&mut r)?,
        a: (0..SPARE).map(|_| field(&mut r)).collect::<SResult<_>>()?,
        b: (0..SPARE).map(|_| field(&mut r)).collect::<SResult<_>>()?,
        g_alpha: field(&mut r)?,
    })
}

impl<E: Pairing> CommitmentKey<E> {
    /// Write the key and its trapdoor into `config.dir()`, creating the directory if needed.
    pub fn save(&self, trapdoor: &Trapdoor<E>, config: &KeyStoreConfig) -> SResult<()> {
        config.check()?;
        let timer = start_timer!(|| format!("save commitment key to {}", config.dir.display()));
        fs::create_dir_all(&config.dir)?;

        let mut header = BufWriter::new(File::create(config.dir.join(HEADER_FILE))?);
        header.write_all(&(self.ell as u64).to_le_bytes())?;
        trapdoor.s.serialize_compressed(&mut header)?;
        self.g.serialize_compressed(&mut header)?;
        self.h.serialize_compressed(&mut header)?;
        self.g_neg.serialize_compressed(&mut header)?;
        self.h_neg.serialize_compressed(&mut header)?;
        self.e_gh.serialize_compressed(&mut header)?;
        self.e_gh_inv.serialize_compressed(&mut header)?;
        trapdoor.alpha.serialize_compressed(&mut header)?;
        self.ped_h.serialize_compressed(&mut header)?;
        for a in &self.a {
            a.serialize_compressed(&mut header)?;
        }
        for b in &self.b {
            b.serialize_compressed(&mut header)?;
        }
        self.g_alpha.serialize_compressed(&mut header)?;
        header.flush()?;

        let len = self.q + 1;
        let tasks = shard_tasks(config.shards);
        run_tasks(config.workers, &tasks, |task| {
            let (start, end) = shard_range(len, config.shards, task.shard);
            let path = config.shard_path(task.prefix, task.shard);
            match task.prefix {
                PK_PREFIX => write_shard(&path, &self.pk[start..end]),
                VK_PREFIX => write_shard(&path, &self.vk[start..end]),
                VK_ALPHA_PREFIX => write_shard(&path, &self.vk_alpha[start..end]),
                PED_VK_PREFIX => write_shard(&path, &self.ped_vk[start..end]),
                _ => write_shard(&path, &self.ped_vk_alpha[start..end]),
            }
        })?;
        end_timer!(timer);
        Ok(())
    }

    /// Read a key of degree bound `2^ell` from `config.dir()` and validate it.
    ///
    /// A stored key with a larger `ell` is truncated to the requested size. A smaller stored key,
    /// a missing or short shard, or an element that does not decode to a valid point is a
    /// `ParameterCorruption`.
    pub fn load<R: ark_std::rand::RngCore>(
        config: &KeyStoreConfig,
        ell: usize,
        rng: &mut R,
    ) -> SResult<(Self, Trapdoor<E>)> {
        config.check()?;
        if ell > MAX_ELL {
            return Err(invalid_args("ell is too large"));
        }
        let timer = start_timer!(|| format!("load commitment key from {}", config.dir.display()));
        let header_file = File::open(config.dir.join(HEADER_FILE)).map_err(corrupt(HEADER_FILE))?;
        let header = read_header::<E, _>(BufReader::new(header_file))?;
        if header.ell < ell {
            return Err(parameter_corruption(&format!(
                "stored key has ell = {}, {} requested",
                header.ell, ell
            )));
        }
        if header.ell > MAX_ELL {
            return Err(parameter_corruption("stored ell out of range"));
        }
        let stored_len = (1usize << header.ell) + 1;
        let q = 1usize << ell;

        let tasks = shard_tasks(config.shards);
        for prefix in [
            PK_PREFIX,
            VK_PREFIX,
            VK_ALPHA_PREFIX,
            PED_VK_PREFIX,
            PED_VK_ALPHA_PREFIX,
        ] {
            let found = discover(&config.dir, prefix)?;
            let expected: Vec<PathBuf> =
                (0..config.shards).map(|k| config.shard_path(prefix, k)).collect();
            if found != expected {
                return Err(parameter_corruption(&format!("missing or extra {} shards", prefix)));
            }
        }

        let shards = run_tasks(config.workers, &tasks, |task| {
            let (start, end) = shard_range(stored_len, config.shards, task.shard);
            // only the prefix up to index q is needed
            let count = end.min(q + 1).saturating_sub(start);
            let path = config.shard_path(task.prefix, task.shard);
            Ok(match task.prefix {
                PK_PREFIX => Shard::<E>::G1(read_shard(&path, count)?),
                _ => Shard::<E>::G2(read_shard(&path, count)?),
            })
        })?;

        let mut g1_seq: Vec<E::G1Affine> = Vec::with_capacity(q + 1);
        let mut g2_seqs: Vec<Vec<E::G2Affine>> = vec![Vec::with_capacity(q + 1); 4];
        for (task, shard) in tasks.iter().zip(shards) {
            match shard {
                Shard::G1(elements) => g1_seq.extend(elements),
                Shard::G2(elements) => {
                    let slot = match task.prefix {
                        VK_PREFIX => 0,
                        VK_ALPHA_PREFIX => 1,
                        PED_VK_PREFIX => 2,
                        _ => 3,
                    };
                    g2_seqs[slot].extend(elements);
                }
            }
        }
        let mut g2_seqs = g2_seqs.into_iter();
        let mut next_g2 = || g2_seqs.next().unwrap_or_default();

        let key = Self {
            ell,
            q,
            g: header.g,
            h: header.h,
            g_neg: header.g_neg,
            h_neg: header.h_neg,
            e_gh: header.e_gh,
            e_gh_inv: header.e_gh_inv,
            g_alpha: header.g_alpha,
            ped_h: header.ped_h,
            pk: g1_seq,
            vk: next_g2(),
            vk_alpha: next_g2(),
            ped_vk: next_g2(),
            ped_vk_alpha: next_g2(),
            a: header.a,
            b: header.b,
        };
        let trapdoor = Trapdoor::new(header.s, header.alpha);
        key.validate(rng)?;
        trapdoor.check_against(&key)?;
        end_timer!(timer);
        Ok((key, trapdoor))
    }
}

/// File names a key with this configuration occupies, header first.
pub fn key_files(config: &KeyStoreConfig) -> Vec<String> {
    let mut names = vec![String::from(HEADER_FILE)];
    for task in shard_tasks(config.shards) {
        names.push(config.shard_name(task.prefix, task.shard));
    }
    names
}
