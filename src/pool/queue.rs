//! # Cola de Tareas
//! src/pool/queue.rs
//!
//! Cola FIFO thread-safe sin límite de capacidad. Es la única estructura que
//! mutan varios threads: el accept loop encola y los workers desencolan.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

/// Tarea que ejecuta un worker (una por conexión aceptada)
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Estado protegido por el mutex
struct QueueState {
    tasks: VecDeque<Task>,

    /// Una vez activado, `dequeue` deja de entregar tareas
    stopping: bool,
}

/// Cola de tareas con espera bloqueante
pub struct TaskQueue {
    state: Mutex<QueueState>,

    /// Condvar para despertar workers cuando hay tareas o al apagar
    condvar: Condvar,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                tasks: VecDeque::new(),
                stopping: false,
            }),
            condvar: Condvar::new(),
        }
    }

    /// Encola una tarea sin bloquear esperando un worker
    ///
    /// Retorna la tarea de vuelta si la cola ya se está apagando.
    pub fn enqueue(&self, task: Task) -> Result<(), Task> {
        let mut state = self.state.lock().unwrap();

        if state.stopping {
            return Err(task);
        }

        state.tasks.push_back(task);

        // Notificar a un worker esperando
        self.condvar.notify_one();

        Ok(())
    }

    /// Desencola la tarea más antigua
    ///
    /// Bloquea hasta que haya una tarea. Retorna `None` cuando la cola se
    /// apaga, aunque queden tareas pendientes.
    pub fn dequeue(&self) -> Option<Task> {
        let mut state = self.state.lock().unwrap();

        loop {
            if state.stopping {
                return None;
            }

            if let Some(task) = state.tasks.pop_front() {
                return Some(task);
            }

            // Esperar a que haya tareas
            state = self.condvar.wait(state).unwrap();
        }
    }

    /// Activa el flag de parada y despierta a todos los workers
    ///
    /// Retorna cuántas tareas encoladas se descartaron.
    pub fn close(&self) -> usize {
        let discarded: Vec<Task> = {
            let mut state = self.state.lock().unwrap();
            state.stopping = true;
            state.tasks.drain(..).collect()
        };

        self.condvar.notify_all();

        // Las tareas se sueltan fuera del lock (cierran sus sockets)
        discarded.len()
    }

    /// Retorna el número de tareas esperando
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().tasks.len()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn recording_task(log: &Arc<Mutex<Vec<usize>>>, id: usize) -> Task {
        let log = Arc::clone(log);
        Box::new(move || log.lock().unwrap().push(id))
    }

    #[test]
    fn test_queue_fifo_order() {
        let queue = TaskQueue::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for id in 0..3 {
            assert!(queue.enqueue(recording_task(&log, id)).is_ok());
        }
        assert_eq!(queue.len(), 3);

        for _ in 0..3 {
            (queue.dequeue().unwrap())();
        }

        assert_eq!(*log.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_queue_is_unbounded() {
        let queue = TaskQueue::new();
        for _ in 0..10_000 {
            assert!(queue.enqueue(Box::new(|| {})).is_ok());
        }
        assert_eq!(queue.len(), 10_000);
    }

    #[test]
    fn test_close_discards_pending() {
        let queue = TaskQueue::new();
        let ran = Arc::new(AtomicUsize::new(0));

        for _ in 0..4 {
            let ran = Arc::clone(&ran);
            queue.enqueue(Box::new(move || {
                ran.fetch_add(1, Ordering::SeqCst);
            }))
            .ok();
        }

        assert_eq!(queue.close(), 4);
        assert!(queue.dequeue().is_none());
        assert!(queue.enqueue(Box::new(|| {})).is_err());
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_close_wakes_blocked_dequeue() {
        let queue = Arc::new(TaskQueue::new());

        let waiter = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.dequeue().is_none())
        };

        thread::sleep(Duration::from_millis(50));
        queue.close();

        assert!(waiter.join().unwrap());
    }

    #[test]
    fn test_enqueue_wakes_blocked_dequeue() {
        let queue = Arc::new(TaskQueue::new());
        let ran = Arc::new(AtomicUsize::new(0));

        let waiter = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                if let Some(task) = queue.dequeue() {
                    task();
                }
            })
        };

        thread::sleep(Duration::from_millis(50));
        let counter = Arc::clone(&ran);
        queue
            .enqueue(Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }))
            .ok();

        waiter.join().unwrap();
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }
}
