//! # Pool de Workers
//! src/pool/mod.rs
//!
//! Número fijo de threads que consumen una cola compartida. El tamaño del
//! pool limita cuántas conexiones se atienden *en paralelo*, no cuántas se
//! admiten: `execute` nunca bloquea y la cola no tiene límite.
//!
//! ```text
//! accept loop --execute--> [TaskQueue] --dequeue--> worker-0 .. worker-N
//! ```
//!
//! ## Apagado
//!
//! `shutdown` activa el flag de parada y despierta a todos. Los workers
//! ociosos salen sin tomar más tareas; los que están ejecutando una tarea la
//! terminan y después salen. Las tareas que seguían en cola se descartan.

mod queue;

use queue::{Task, TaskQueue};
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Errores del pool
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Se intentó encolar después de `shutdown`
    #[error("worker pool is shutting down")]
    ShuttingDown,
}

/// Pool de tamaño fijo
pub struct WorkerPool {
    queue: Arc<TaskQueue>,
    workers: Vec<JoinHandle<()>>,
    size: usize,
}

impl WorkerPool {
    /// Arranca `size` workers
    ///
    /// Si el sistema no puede crear alguno de los threads, detiene los que
    /// ya arrancaron y retorna el error.
    ///
    /// # Panics
    ///
    /// Si `size` es 0 (la config lo valida antes).
    pub fn new(size: usize) -> io::Result<Self> {
        Self::start(size, spawn_worker)
    }

    fn start<S>(size: usize, mut spawn: S) -> io::Result<Self>
    where
        S: FnMut(usize, Arc<TaskQueue>) -> io::Result<JoinHandle<()>>,
    {
        assert!(size > 0, "worker pool needs at least one worker");

        let queue = Arc::new(TaskQueue::new());
        let mut workers = Vec::with_capacity(size);

        for id in 0..size {
            match spawn(id, Arc::clone(&queue)) {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    log::error!("No se pudo crear el worker {}: {}", id, e);
                    queue.close();
                    for handle in workers {
                        let _ = handle.join();
                    }
                    return Err(e);
                }
            }
        }

        log::debug!("Pool iniciado con {} workers", size);

        Ok(Self { queue, workers, size })
    }

    /// Encola una tarea; retorna de inmediato
    pub fn execute<F>(&self, task: F) -> Result<(), PoolError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.queue
            .enqueue(Box::new(task))
            .map_err(|_| PoolError::ShuttingDown)
    }

    /// Número de workers configurado
    pub fn size(&self) -> usize {
        self.size
    }

    /// Tareas esperando un worker libre
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Detiene el pool y espera a que todos los workers terminen
    ///
    /// Retorna cuántas tareas en cola se descartaron. Llamarlo dos veces es
    /// inofensivo.
    pub fn shutdown(&mut self) -> usize {
        let discarded = self.queue.close();
        if discarded > 0 {
            log::warn!("Apagando pool: {} tareas en cola descartadas", discarded);
        }

        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                log::error!("Un worker terminó con pánico");
            }
        }

        discarded
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn spawn_worker(id: usize, queue: Arc<TaskQueue>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("worker-{}", id))
        .spawn(move || worker_loop(id, queue))
}

/// Loop de cada worker: esperar tarea, ejecutarla, repetir
fn worker_loop(id: usize, queue: Arc<TaskQueue>) {
    while let Some(task) = queue.dequeue() {
        run_task(id, task);
    }

    log::debug!("Worker {} terminado", id);
}

/// Ejecuta una tarea aislando un posible pánico
fn run_task(id: usize, task: Task) {
    if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
        log::error!("Worker {}: la tarea terminó con pánico", id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::sync::{Barrier, Mutex};
    use std::time::Duration;

    #[test]
    fn test_pool_runs_all_tasks() {
        let mut pool = WorkerPool::new(4).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        let (tx, rx) = mpsc::channel();
        for _ in 0..100 {
            let counter = Arc::clone(&counter);
            let tx = tx.clone();
            pool.execute(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                tx.send(()).unwrap();
            })
            .unwrap();
        }

        for _ in 0..100 {
            rx.recv_timeout(Duration::from_secs(5)).unwrap();
        }
        assert_eq!(counter.load(Ordering::SeqCst), 100);
        assert_eq!(pool.shutdown(), 0);
    }

    #[test]
    fn test_pool_size() {
        let pool = WorkerPool::new(3).unwrap();
        assert_eq!(pool.size(), 3);
    }

    #[test]
    fn test_spawn_failure_is_reported() {
        let started = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&started);
        let result = WorkerPool::start(4, move |id, queue| {
            if id == 2 {
                return Err(io::Error::other("no more threads"));
            }
            counter.fetch_add(1, Ordering::SeqCst);
            spawn_worker(id, queue)
        });

        // Los dos workers creados se detuvieron y se unieron antes de retornar
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "no more threads");
        assert_eq!(started.load(Ordering::SeqCst), 2);
    }

    #[test]
    #[should_panic]
    fn test_zero_workers_panics() {
        let _ = WorkerPool::new(0).unwrap();
    }

    #[test]
    fn test_execute_does_not_block_when_busy() {
        let pool = WorkerPool::new(1).unwrap();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let (started_tx, started_rx) = mpsc::channel();

        // Ocupar el único worker
        pool.execute(move || {
            started_tx.send(()).unwrap();
            release_rx.recv().ok();
        })
        .unwrap();
        started_rx.recv_timeout(Duration::from_secs(5)).unwrap();

        // Estas se encolan sin bloquear
        for _ in 0..10 {
            pool.execute(|| {}).unwrap();
        }
        assert_eq!(pool.pending(), 10);

        release_tx.send(()).unwrap();
    }

    #[test]
    fn test_concurrency_is_bounded_by_size() {
        let pool = WorkerPool::new(2).unwrap();
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::channel();

        for _ in 0..8 {
            let active = Arc::clone(&active);
            let peak = Arc::clone(&peak);
            let tx = tx.clone();
            pool.execute(move || {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(20));
                active.fetch_sub(1, Ordering::SeqCst);
                tx.send(()).unwrap();
            })
            .unwrap();
        }

        for _ in 0..8 {
            rx.recv_timeout(Duration::from_secs(5)).unwrap();
        }
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[test]
    fn test_tasks_run_in_parallel() {
        let pool = WorkerPool::new(3).unwrap();
        let barrier = Arc::new(Barrier::new(3));
        let (tx, rx) = mpsc::channel();

        // Si los workers no corrieran en paralelo, la barrera nunca se abriría
        for _ in 0..3 {
            let barrier = Arc::clone(&barrier);
            let tx = tx.clone();
            pool.execute(move || {
                barrier.wait();
                tx.send(()).unwrap();
            })
            .unwrap();
        }

        for _ in 0..3 {
            rx.recv_timeout(Duration::from_secs(5)).unwrap();
        }
    }

    #[test]
    fn test_shutdown_waits_for_in_flight_task() {
        let mut pool = WorkerPool::new(1).unwrap();
        let finished = Arc::new(AtomicUsize::new(0));
        let (started_tx, started_rx) = mpsc::channel();

        let done = Arc::clone(&finished);
        pool.execute(move || {
            started_tx.send(()).unwrap();
            thread::sleep(Duration::from_millis(100));
            done.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        started_rx.recv_timeout(Duration::from_secs(5)).unwrap();

        // Esta queda en cola y se descarta
        let never = Arc::clone(&finished);
        pool.execute(move || {
            never.fetch_add(100, Ordering::SeqCst);
        })
        .unwrap();

        assert_eq!(pool.shutdown(), 1);
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_execute_after_shutdown_fails() {
        let mut pool = WorkerPool::new(2).unwrap();
        pool.shutdown();
        assert_eq!(pool.execute(|| {}), Err(PoolError::ShuttingDown));

        // Segundo shutdown no hace nada
        assert_eq!(pool.shutdown(), 0);
    }

    #[test]
    fn test_panicking_task_does_not_kill_worker() {
        let pool = WorkerPool::new(1).unwrap();
        let (tx, rx) = mpsc::channel();

        pool.execute(|| panic!("boom")).unwrap();
        pool.execute(move || tx.send(42).unwrap()).unwrap();

        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 42);
    }

    #[test]
    fn test_roughly_fifo_with_single_worker() {
        let pool = WorkerPool::new(1).unwrap();
        let order = Arc::new(Mutex::new(Vec::new()));
        let (tx, rx) = mpsc::channel();

        for i in 0..5 {
            let order = Arc::clone(&order);
            let tx = tx.clone();
            pool.execute(move || {
                order.lock().unwrap().push(i);
                tx.send(()).unwrap();
            })
            .unwrap();
        }

        for _ in 0..5 {
            rx.recv_timeout(Duration::from_secs(5)).unwrap();
        }
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }
}
