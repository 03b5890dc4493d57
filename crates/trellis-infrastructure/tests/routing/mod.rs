//! Route Binding Tests
