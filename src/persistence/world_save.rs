use crate::persistence::{atomic_write, ChunkSerializer, PersistenceError, PersistenceResult};
use crate::world::{ChunkKey, Dimension, World, WorldLockManager};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk save of a world: one file per chunk under `<root>/<dimension>/`
#[derive(Debug)]
pub struct WorldSave {
    save_dir: PathBuf,
    serializer: ChunkSerializer,
}

impl WorldSave {
    /// Open (and create if needed) a save directory
    pub fn new<P: AsRef<Path>>(save_dir: P, compress: bool) -> PersistenceResult<Self> {
        let save_dir = save_dir.as_ref().to_path_buf();
        fs::create_dir_all(&save_dir)?;
        Ok(Self {
            save_dir,
            serializer: ChunkSerializer::new(compress),
        })
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    fn dimension_dir(&self, dimension: Dimension) -> PathBuf {
        let name = match dimension {
            Dimension::Overworld => "overworld",
            Dimension::Nether => "nether",
        };
        self.save_dir.join(name)
    }

    fn chunk_path(&self, key: ChunkKey) -> PathBuf {
        self.dimension_dir(key.dimension).join(format!(
            "chunk_{}_{}_{}.rsc",
            key.pos.x, key.pos.y, key.pos.z
        ))
    }

    /// Write one chunk. Returns false if the chunk is not loaded.
    pub fn save_chunk(&self, world: &World, key: ChunkKey, lock: &mut WorldLockManager) -> PersistenceResult<bool> {
        let Some(handle) = world.chunk_handle(key) else {
            return Ok(false);
        };
        let data = {
            let chunk = lock.lock_chunk(&handle);
            let data = self.serializer.serialize(chunk, world.registry())?;
            chunk.mark_clean();
            data
        };
        // no chunk lock across file I/O
        lock.clear();

        let path = self.chunk_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        atomic_write(&path, &data)?;
        Ok(true)
    }

    /// Write every loaded chunk. Returns the number of chunks saved.
    pub fn save_world(&self, world: &World, lock: &mut WorldLockManager) -> PersistenceResult<usize> {
        let mut saved = 0;
        for key in world.loaded_chunk_keys() {
            if self.save_chunk(world, key, lock)? {
                saved += 1;
            }
        }
        log::info!("Saved {} chunks to {}", saved, self.save_dir.display());
        Ok(saved)
    }

    /// Load one chunk into the world. Returns false if no file exists for it.
    pub fn load_chunk(&self, world: &World, key: ChunkKey) -> PersistenceResult<bool> {
        let path = self.chunk_path(key);
        if !path.exists() {
            return Ok(false);
        }
        let data = fs::read(&path)?;
        let chunk = self.serializer.deserialize(&data, world.registry())?;
        if chunk.key() != key {
            return Err(PersistenceError::CorruptedData(format!(
                "{} holds chunk {:?}, expected {:?}",
                path.display(),
                chunk.key(),
                key
            )));
        }
        world.insert_chunk(chunk);
        Ok(true)
    }

    /// Load every saved chunk of every dimension. Returns the number loaded.
    pub fn load_world(&self, world: &World) -> PersistenceResult<usize> {
        let mut loaded = 0;
        for dimension in [Dimension::Overworld, Dimension::Nether] {
            let dir = self.dimension_dir(dimension);
            if !dir.exists() {
                continue;
            }
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.extension().and_then(|ext| ext.to_str()) != Some("rsc") {
                    continue;
                }
                let data = fs::read(&path)?;
                let chunk = self.serializer.deserialize(&data, world.registry())?;
                if chunk.key().dimension != dimension {
                    log::warn!("Skipping {}: chunk belongs to {:?}", path.display(), chunk.key().dimension);
                    continue;
                }
                world.insert_chunk(chunk);
                loaded += 1;
            }
        }
        log::info!("Loaded {} chunks from {}", loaded, self.save_dir.display());
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::builtin_registry;
    use crate::world::{Block, ChunkPos, WorldPos};
    use crate::EngineConfig;
    use std::sync::Arc;

    #[test]
    fn test_missing_chunk_is_not_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (registry, _) = builtin_registry();
        let world = World::new(Arc::new(registry), &EngineConfig::default());
        let save = WorldSave::new(dir.path(), false).expect("save");

        let key = ChunkKey::new(ChunkPos::new(4, 0, 4), Dimension::Overworld);
        assert!(!save.load_chunk(&world, key).expect("load"));
        assert!(!save.save_chunk(&world, key, &mut WorldLockManager::new()).expect("save"));
    }

    #[test]
    fn test_save_marks_chunks_clean() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (registry, builtin) = builtin_registry();
        let world = World::new(Arc::new(registry), &EngineConfig::default());
        let mut lock = WorldLockManager::new();
        let key = ChunkKey::new(ChunkPos::new(0, 0, 0), Dimension::Nether);
        world.load_empty_chunk(key);
        let bi = world.block_iterator(WorldPos::new(1, 1, 1, Dimension::Nether));
        world.set_block(&bi, &mut lock, Block::new(builtin.stone)).expect("set");

        let save = WorldSave::new(dir.path(), true).expect("save");
        assert_eq!(save.save_world(&world, &mut lock).expect("save"), 1);
        assert!(!lock.is_holding_lock());
        assert!(dir.path().join("nether").join("chunk_0_0_0.rsc").exists());

        let handle = world.chunk_handle(key).expect("loaded");
        assert!(!lock.lock_chunk(&handle).is_dirty());
    }
}
