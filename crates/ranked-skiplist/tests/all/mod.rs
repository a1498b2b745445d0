/// Insert `key` into a sorted reference `Vec`, after any equal elements.
///
/// If `unique`, an element equal to `key` which is already present is kept instead.
pub(crate) fn insert_into_reference(reference: &mut Vec<u32>, key: u32, unique: bool) {
    let position = reference.partition_point(|&existing| existing <= key);

    if !unique || position == 0 || reference[position - 1] != key {
        reference.insert(position, key);
    }
}

macro_rules! tests_for_all_lists {
    ($list:ident, unique = $unique:literal $(,)?) => {
        // ================================
        //  Empty List
        // ================================

        #[test]
        fn empty_list() {
            let mut list: $list<u8> = $list::new();

            assert!(list.is_empty());
            assert_eq!(list.len(), 0);
            assert!(!list.contains(&0));
            assert!(!list.contains(&255));
            assert_eq!(list.get(0), None);
            assert_eq!(list.select(0), Err(OutOfRange { index: 0, len: 0 }));
            assert_eq!(list.first(), None);
            assert_eq!(list.last(), None);
            assert_eq!(list.index_of(&1), None);
            assert!(list.iter().next().is_none());
            assert!(list.iter().next_back().is_none());

            assert!(!list.remove(&0));
            assert_eq!(list.take(&0), None);
            assert_eq!(list.remove_at(0), Err(OutOfRange { index: 0, len: 0 }));
            list.clear();

            list.verify().unwrap();
            assert!(list.into_vec().is_empty());

            let list: $list<u8> = Default::default();
            let _check_that_debug_works = format!("{list:?}");
        }

        // ================================
        //  Concrete scenarios
        // ================================

        #[test]
        fn ascending_inserts() {
            let mut list = $list::new();

            for key in [1, 2, 3] {
                list.insert(key);
                list.verify().unwrap();
            }

            assert_eq!(list.len(), 3);
            assert_eq!(list.to_vec(), [1, 2, 3]);
        }

        #[test]
        fn delete_from_the_middle() {
            let mut list = $list::new();
            list.extend([1, 2, 3]);

            assert!(list.remove(&2));
            list.verify().unwrap();

            assert_eq!(list.len(), 2);
            assert_eq!(list.to_vec(), [1, 3]);
            assert!(!list.contains(&2));
        }

        #[test]
        fn contains_after_insert() {
            let mut list = $list::new();

            assert!(!list.contains(&1));
            list.insert(1);
            assert!(list.contains(&1));
        }

        #[test]
        fn select_matches_iteration() {
            let mut list = $list::new();
            for key in [4, 2, 3] {
                list.insert(key);
            }

            assert_eq!(list.select(0), Ok(&2));
            assert_eq!(list.select(1), Ok(&3));
            assert_eq!(list.select(2), Ok(&4));
            assert_eq!(list.select(3), Err(OutOfRange { index: 3, len: 3 }));

            for (index, key) in list.iter().enumerate() {
                assert_eq!(&list[index], key);
            }
        }

        #[test]
        fn deleting_absent_keys_changes_nothing() {
            let mut list: $list<i32> = [5, 10, 15].into_iter().collect();

            for absent in [0, 7, 20, -1] {
                assert!(!list.remove(&absent));
                assert_eq!(list.len(), 3);
                list.verify().unwrap();
            }

            assert_eq!(list.to_vec(), [5, 10, 15]);
        }

        // ================================
        //  Ranks
        // ================================

        #[test]
        fn ranks_follow_removals() {
            let mut list: $list<u32> = (0..20).rev().collect();

            assert_eq!(list.remove_at(0), Ok(0));
            assert_eq!(list.remove_at(18), Ok(19));
            assert_eq!(list.remove_at(18), Err(OutOfRange { index: 18, len: 18 }));
            assert_eq!(list.take(&10), Some(10));
            list.verify().unwrap();

            assert_eq!(list.first(), Some(&1));
            assert_eq!(list.last(), Some(&18));
            assert_eq!(list.index_of(&9), Some(8));
            assert_eq!(list.index_of(&11), Some(9));
            assert_eq!(list.index_of(&10), None);
            assert_eq!(list.get(16), Some(&18));
            assert_eq!(list.get(17), None);
        }

        #[test]
        fn scripted_heights() {
            fn exercise<P: Prng32>(mut list: $list<u32, DefaultComparator, P>) {
                // 37 and 101 are coprime, so this inserts every key in `0..101` once.
                for step in 0..101 {
                    list.insert(step * 37 % 101);
                    list.verify().unwrap();
                }

                assert_eq!(list.len(), 101);
                for index in 0..101 {
                    assert_eq!(list.select(index), Ok(&(index as u32)));
                }
                assert!(list.iter().rev().eq((0..101).rev().collect::<Vec<u32>>().iter()));

                for step in 0..101 {
                    let key = step * 53 % 101;
                    if key % 2 == 0 {
                        assert!(list.remove(&key));
                        list.verify().unwrap();
                    }
                }

                let odd: Vec<u32> = (0..101).filter(|key| key % 2 == 1).collect();
                assert_eq!(list.to_vec(), odd);

                while let Ok(_key) = list.remove_at(list.len() / 2) {
                    list.verify().unwrap();
                }
                assert!(list.is_empty());
            }

            exercise($list::with_parts(DefaultComparator, LevelGenerator::with_prng(Always)));
            exercise($list::with_parts(DefaultComparator, LevelGenerator::with_prng(Never)));
            exercise($list::with_parts(
                DefaultComparator,
                LevelGenerator::with_prng(Cycle::new(&[0, 1, 0, 0, 1, 1, 0, 0, 0, 1])),
            ));

            let boxed: Box<dyn Prng32> = Box::new(Rand32::new(9));
            exercise($list::with_parts(DefaultComparator, LevelGenerator::with_prng(boxed)));
        }

        #[test]
        fn options_shape_the_list() {
            let options = SkiplistOptions {
                max_height:       3,
                branching_factor: 4,
                seed:             31,
            };
            let mut list = $list::with_options(&options).unwrap();

            list.extend((0..500_u32).rev());
            list.verify().unwrap();
            assert_eq!(list.get(250), Some(&250));

            let flat = SkiplistOptions { max_height: 1, ..options };
            let mut list = $list::with_options(&flat).unwrap();

            list.extend((0..100_u32).rev());
            list.verify().unwrap();
            assert_eq!(list.last(), Some(&99));
        }

        // ================================
        //  Iteration
        // ================================

        #[test]
        fn iteration_in_both_directions() {
            let list: $list<u32> = [8, 3, 5, 1].into_iter().collect();

            assert_eq!(list.iter().len(), 4);
            assert!(list.iter().eq([1, 3, 5, 8].iter()));
            assert!(list.iter().rev().eq([8, 5, 3, 1].iter()));

            let borrowed: Vec<u32> = (&list).into_iter().copied().collect();
            let owned: Vec<u32> = list.clone().into_iter().collect();
            assert_eq!(borrowed, owned);
            assert_eq!(list.into_iter().rev().collect::<Vec<_>>(), [8, 5, 3, 1]);
        }

        #[test]
        fn cursor_seeks_and_wraps() {
            let list: $list<u32> = [40, 10, 30, 20].into_iter().collect();
            let mut cursor = list.cursor();

            cursor.seek(&25);
            assert_eq!(cursor.current(), Some(&30));
            assert_eq!(cursor.index(), Some(2));
            assert_eq!(cursor.prev(), Some(&20));
            assert_eq!(cursor.next(), Some(&30));
            assert_eq!(cursor.next(), Some(&40));
            assert_eq!(cursor.next(), None);
            assert_eq!(cursor.next(), Some(&10));

            cursor.seek(&41);
            assert!(!cursor.valid());
            assert_eq!(cursor.prev(), Some(&40));

            let _check_that_debug_works = format!("{cursor:?}");
        }

        // ================================
        //  Misc
        // ================================

        #[test]
        fn independent_list_clone() {
            let mut list: $list<u32> = [2, 1].into_iter().collect();
            let clone = list.clone();

            list.insert(3);
            assert!(list.remove(&1));

            assert_eq!(clone.to_vec(), [1, 2]);
            assert_eq!(list.to_vec(), [2, 3]);
            assert_ne!(list, clone);

            list.clear();
            list.extend([1, 2]);
            assert_eq!(list, clone);
        }

        #[test]
        fn wrapped_comparators() {
            let cmp = DefaultComparator;
            let mut list: $list<u32, &DefaultComparator> = $list::with_comparator(&cmp);
            list.extend([2, 3, 1]);
            assert_eq!(list.to_vec(), [1, 2, 3]);

            let boxed: Box<dyn Comparator<u32>> = Box::new(DefaultComparator);
            let mut list = $list::with_comparator(boxed);
            list.extend([2, 3, 1]);
            assert_eq!(list.to_vec(), [1, 2, 3]);
            list.verify().unwrap();
        }

        // A comparator which answers at random must not break the links and spans of the list,
        // even though the order of its elements is then meaningless.
        #[test]
        fn broken_comparators() {
            #[derive(Debug)]
            struct BadComparator(RefCell<Rand32>);

            impl Comparator<u32> for BadComparator {
                fn is_le(&self, _lhs: &u32, _rhs: &u32) -> bool {
                    self.0.borrow_mut().rand_range(0..2) == 0
                }

                fn is_eq(&self, _lhs: &u32, _rhs: &u32) -> bool {
                    self.0.borrow_mut().rand_range(0..2) == 0
                }
            }

            let mut list = $list::with_comparator(BadComparator(RefCell::new(Rand32::new(666))));

            for key in 0..1024_u32 {
                list.insert(key);
            }
            for key in 0..512_u32 {
                let _removed = list.remove(&key);
                let _found = list.contains(&key);
            }

            assert!(list.len() <= 1024);
            assert_eq!(list.iter().fold(0, |count, _| count + 1), list.len());
            assert_eq!(list.iter().rev().fold(0, |count, _| count + 1), list.len());
            assert!(matches!(
                list.verify(),
                Ok(()) | Err(StructureError::OutOfOrder { .. }),
            ));
        }

        // ================================
        //  Large List
        // ================================

        #[test]
        fn many_operations_against_reference() {
            let mut prng = Rand32::new(0x_1234_5678);
            let mut list = $list::new_seeded(77);
            let mut reference: Vec<u32> = Vec::new();

            for _ in 0..4000 {
                let key = prng.rand_range(0..64);

                match prng.rand_range(0..6) {
                    0 | 1 => {
                        list.insert(key);
                        all::insert_into_reference(&mut reference, key, $unique);
                    }
                    2 => {
                        let expected = reference
                            .iter()
                            .position(|&existing| existing == key)
                            .map(|index| reference.remove(index));
                        assert_eq!(list.take(&key), expected);
                    }
                    3 => {
                        let index = prng.rand_range(0..(reference.len() as u32 + 1)) as usize;
                        let expected = if index < reference.len() {
                            Ok(reference.remove(index))
                        } else {
                            Err(OutOfRange { index, len: reference.len() })
                        };
                        assert_eq!(list.remove_at(index), expected);
                    }
                    4 => {
                        let index = prng.rand_range(0..(reference.len() as u32 + 1)) as usize;
                        assert_eq!(list.get(index), reference.get(index));
                    }
                    _ => {
                        assert_eq!(list.contains(&key), reference.contains(&key));
                        assert_eq!(
                            list.index_of(&key),
                            reference.iter().position(|&existing| existing == key),
                        );
                    }
                }

                assert_eq!(list.len(), reference.len());
                list.verify().unwrap();
            }

            assert!(list.iter().eq(reference.iter()));
            assert!(list.iter().rev().eq(reference.iter().rev()));
        }
    };
}

pub(crate) use tests_for_all_lists as tests_for_all_lists;
