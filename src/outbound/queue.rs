pub mod welcome_queue;
